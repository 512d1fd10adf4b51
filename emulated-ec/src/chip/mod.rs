use core::fmt::Debug;

use anyhow::{Context, Result};
use log::debug;

use self::constraint::{ConstraintEmitter, ConstraintSystem};
use self::instruction::set::AirInstruction;
use self::instruction::Instruction;
use self::layout::Layout;
use self::trace::writer::TraceWriter;
use crate::air::AirConstraint;
use crate::math::prelude::*;

pub mod bool;
pub mod builder;
pub mod component;
pub mod constraint;
pub mod ec;
pub mod field;
pub mod instruction;
pub mod layout;
pub mod register;
pub mod trace;
pub mod uint;

pub use component::{Component, ComponentManifest};

/// Static configuration of a chip: the native field and the custom instruction set.
pub trait AirParameters: 'static + Clone + Send + Sync + Debug {
    type Field: PrimeField64;

    /// The type of instruction that the chip supports
    type Instruction: Instruction<Self::Field>;
}

/// A recorded instruction schedule over a cell arena.
///
/// The same schedule drives the witness pass ([`Chip::write_witness`]) and the constraint pass
/// ([`Chip::emit_constraints`]).
#[derive(Debug, Clone)]
pub struct Chip<L: AirParameters> {
    instructions: Vec<AirInstruction<L::Field, L::Instruction>>,
    num_cells: usize,
    manifest: ComponentManifest,
}

impl<L: AirParameters> Chip<L> {
    pub fn instructions(&self) -> &[AirInstruction<L::Field, L::Instruction>] {
        &self.instructions
    }

    pub const fn num_cells(&self) -> usize {
        self.num_cells
    }

    pub const fn manifest(&self) -> ComponentManifest {
        self.manifest
    }

    pub fn rows_amount(&self, width: usize) -> Result<usize> {
        Ok(Layout::new(width)?.rows_amount(self.num_cells))
    }

    /// A writer over an empty witness table of the given width.
    pub fn new_writer(&self, width: usize) -> Result<TraceWriter<L::Field>> {
        self.manifest.check(width)?;
        TraceWriter::new(Layout::new(width)?, self.num_cells)
    }

    /// The witness pass: runs every instruction in schedule order.
    ///
    /// Input registers must be written before calling this.
    pub fn write_witness(&self, writer: &mut TraceWriter<L::Field>) -> Result<()> {
        debug!(
            "witness pass: {} instructions over {} cells, width {}",
            self.instructions.len(),
            self.num_cells,
            writer.layout().width()
        );
        for (i, instruction) in self.instructions.iter().enumerate() {
            instruction
                .write(writer)
                .with_context(|| format!("witness generation failed at instruction {i}"))?;
        }
        Ok(())
    }

    /// The constraint pass: emits one gate per instruction into `sink`.
    pub fn emit_constraints<CS: ConstraintSystem<L::Field>>(
        &self,
        width: usize,
        sink: &mut CS,
    ) -> Result<()> {
        self.manifest.check(width)?;
        let layout = Layout::new(width)?;
        let mut emitter = ConstraintEmitter::new(layout, self.num_cells);
        for instruction in self.instructions.iter() {
            instruction.eval(&mut emitter);
            emitter.flush(sink);
        }
        debug!(
            "constraint pass: {} instructions, {} rows at width {}",
            self.instructions.len(),
            layout.rows_amount(self.num_cells),
            width
        );
        Ok(())
    }
}
