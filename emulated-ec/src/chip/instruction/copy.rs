use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::Instruction;
use crate::air::parser::AirParser;
use crate::air::AirConstraint;
use crate::chip::register::memory::CellSlice;
use crate::chip::trace::writer::TraceWriter;
use crate::math::prelude::*;

/// Copies `source` into `target` and ties them with copy constraints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CopyInstruction {
    pub source: CellSlice,
    pub target: CellSlice,
}

impl<AP: AirParser> AirConstraint<AP> for CopyInstruction {
    fn eval(&self, parser: &mut AP) {
        parser.copy_constraint(&self.source, &self.target);
    }
}

impl<F: PrimeField64> Instruction<F> for CopyInstruction {
    fn write(&self, writer: &mut TraceWriter<F>) -> Result<()> {
        let values = writer.read_slice(&self.source)?;
        writer.write_slice(&self.target, &values)
    }
}
