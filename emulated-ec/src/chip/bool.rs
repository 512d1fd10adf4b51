use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};

use super::builder::AirBuilder;
use super::instruction::set::AirInstruction;
use super::instruction::Instruction;
use super::register::bit::BitRegister;
use super::register::memory::CellSlice;
use super::register::Register;
use super::trace::writer::TraceWriter;
use super::AirParameters;
use crate::air::parser::AirParser;
use crate::air::AirConstraint;
use crate::math::prelude::*;

/// Asserts `b * (b - 1) = 0` for every cell of the slice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BitConstraint(pub CellSlice);

impl<AP: AirParser> AirConstraint<AP> for BitConstraint {
    fn eval(&self, parser: &mut AP) {
        let bits = self.0.eval_slice(parser).to_vec();
        for bit in bits {
            let bit_sq = parser.mul(bit, bit);
            let constraint = parser.sub(bit_sq, bit);
            parser.constraint(constraint);
        }
    }
}

impl<F: PrimeField64> Instruction<F> for BitConstraint {
    fn write(&self, _writer: &mut TraceWriter<F>) -> Result<()> {
        Ok(())
    }
}

/// Cell-wise `result = bit ? true_value : false_value`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SelectInstruction {
    bit: BitRegister,
    true_value: CellSlice,
    false_value: CellSlice,
    pub result: CellSlice,
}

impl<L: AirParameters> AirBuilder<L> {
    pub fn select<T: Register>(&mut self, bit: &BitRegister, a: &T, b: &T) -> T {
        let result = self.alloc::<T>();
        self.set_select(bit, a, b, &result);
        result
    }

    pub fn set_select<T: Register>(&mut self, bit: &BitRegister, a: &T, b: &T, result: &T) {
        let instr = SelectInstruction {
            bit: *bit,
            true_value: *a.register(),
            false_value: *b.register(),
            result: *result.register(),
        };
        self.register_air_instruction(AirInstruction::Select(instr));
    }
}

impl<AP: AirParser> AirConstraint<AP> for SelectInstruction {
    fn eval(&self, parser: &mut AP) {
        let bit = self.bit.eval(parser);
        let true_slice = self.true_value.eval_slice(parser).to_vec();
        let false_slice = self.false_value.eval_slice(parser).to_vec();
        let result_slice = self.result.eval_slice(parser).to_vec();

        // result - false_value - bit * (true_value - false_value)
        for ((x_true, x_false), x) in true_slice
            .into_iter()
            .zip(false_slice)
            .zip(result_slice)
        {
            let delta = parser.sub(x_true, x_false);
            let bit_delta = parser.mul(bit, delta);
            let expected = parser.add(x_false, bit_delta);
            let constraint = parser.sub(x, expected);
            parser.constraint(constraint);
        }
    }
}

impl<F: PrimeField64> Instruction<F> for SelectInstruction {
    fn write(&self, writer: &mut TraceWriter<F>) -> Result<()> {
        ensure!(
            self.true_value.len() == self.result.len()
                && self.false_value.len() == self.result.len(),
            "select operands have mismatched lengths"
        );
        let bit = writer.read(&self.bit)?;
        let values = if bit == F::ONE {
            writer.read_slice(&self.true_value)?
        } else if bit == F::ZERO {
            writer.read_slice(&self.false_value)?
        } else {
            bail!("selector {bit} is not a bit");
        };
        writer.write_slice(&self.result, &values)
    }
}
