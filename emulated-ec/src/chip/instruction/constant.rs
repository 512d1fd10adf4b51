use anyhow::Result;
use itertools::Itertools;

use super::Instruction;
use crate::air::parser::AirParser;
use crate::air::AirConstraint;
use crate::chip::register::memory::CellSlice;
use crate::chip::trace::writer::TraceWriter;
use crate::math::prelude::*;

/// Pins cells to constant values.
///
/// With `assign` set the witness pass also writes the values; otherwise the cells are owned by
/// another instruction and this one only asserts them.
#[derive(Debug, Clone)]
pub struct ConstantInstruction<F> {
    pub target: CellSlice,
    pub values: Vec<F>,
    pub assign: bool,
}

impl<F: Field, AP: AirParser<Field = F>> AirConstraint<AP> for ConstantInstruction<F> {
    fn eval(&self, parser: &mut AP) {
        let targets = self.target.eval_slice(parser).to_vec();
        for (target, value) in targets.into_iter().zip_eq(self.values.iter()) {
            let difference = parser.sub_const(target, *value);
            parser.constraint(difference);
        }
    }
}

impl<F: PrimeField64> Instruction<F> for ConstantInstruction<F> {
    fn write(&self, writer: &mut TraceWriter<F>) -> Result<()> {
        if self.assign {
            writer.write_slice(&self.target, &self.values)?;
        }
        Ok(())
    }
}
