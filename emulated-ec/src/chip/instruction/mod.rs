use core::fmt::Debug;

use anyhow::Result;

use crate::air::AirConstraint;
use crate::chip::constraint::ConstraintEmitter;
use crate::chip::trace::writer::TraceWriter;
use crate::math::prelude::*;

pub mod constant;
pub mod copy;
pub mod empty;
pub mod range;
pub mod set;

/// An entry of the instruction schedule.
///
/// `write` is the witness-only entry point and `AirConstraint::eval` the constraint-only one.
/// Both see the same registers, so an instruction writes exactly the cells it constrains.
pub trait Instruction<F: PrimeField64>:
    'static + Send + Sync + Clone + Debug + AirConstraint<ConstraintEmitter<F>>
{
    /// Computes and writes the cells owned by this instruction from already written inputs.
    fn write(&self, writer: &mut TraceWriter<F>) -> Result<()>;
}
