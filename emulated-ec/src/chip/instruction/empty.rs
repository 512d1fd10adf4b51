use anyhow::Result;

use super::Instruction;
use crate::air::parser::AirParser;
use crate::air::AirConstraint;
use crate::chip::trace::writer::TraceWriter;
use crate::math::prelude::*;

/// An instruction set with no custom instructions, for chips built from builtins only.
#[derive(Clone, Debug)]
pub struct EmptyInstruction<F> {
    _marker: core::marker::PhantomData<F>,
}

impl<F: PrimeField64> Instruction<F> for EmptyInstruction<F> {
    fn write(&self, _writer: &mut TraceWriter<F>) -> Result<()> {
        Ok(())
    }
}

impl<F: Field, AP: AirParser<Field = F>> AirConstraint<AP> for EmptyInstruction<F> {
    fn eval(&self, _parser: &mut AP) {}
}
