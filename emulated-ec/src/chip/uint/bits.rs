use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::air::parser::AirParser;
use crate::air::AirConstraint;
use crate::chip::builder::AirBuilder;
use crate::chip::instruction::set::AirInstruction;
use crate::chip::instruction::Instruction;
use crate::chip::register::array::ArrayRegister;
use crate::chip::register::bit::BitRegister;
use crate::chip::register::element::ElementRegister;
use crate::chip::register::Register;
use crate::chip::trace::writer::TraceWriter;
use crate::chip::AirParameters;
use crate::math::prelude::*;

/// Decomposes a cell into little-endian bits: `value = sum_j bits[j] * 2^j`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BitDecompositionInstruction {
    value: ElementRegister,
    pub bits: ArrayRegister<BitRegister>,
}

impl<L: AirParameters> AirBuilder<L> {
    pub fn bit_decomposition(
        &mut self,
        value: &ElementRegister,
        nb_bits: usize,
    ) -> ArrayRegister<BitRegister> {
        let bits = self.alloc_array::<BitRegister>(nb_bits);
        let instr = BitDecompositionInstruction {
            value: *value,
            bits,
        };
        self.register_air_instruction(AirInstruction::BitDecomposition(instr));
        bits
    }
}

impl<AP: AirParser> AirConstraint<AP> for BitDecompositionInstruction {
    fn eval(&self, parser: &mut AP) {
        let value = self.value.eval(parser);
        let bits = self.bits.eval_vec(parser);

        let mut acc = parser.zero();
        let mut power = AP::Field::ONE;
        for bit in bits {
            let term = parser.mul_const(bit, power);
            acc = parser.add(acc, term);
            power = power.double();
        }
        let constraint = parser.sub(acc, value);
        parser.constraint(constraint);
    }
}

impl<F: PrimeField64> Instruction<F> for BitDecompositionInstruction {
    fn write(&self, writer: &mut TraceWriter<F>) -> Result<()> {
        let value = writer.read(&self.value)?.to_canonical_u64();
        let nb_bits = self.bits.len();
        ensure!(
            nb_bits >= 64 || value >> nb_bits == 0,
            "value {value} does not fit in {nb_bits} bits"
        );
        let bits = (0..nb_bits)
            .map(|j| {
                if j < 64 && (value >> j) & 1 == 1 {
                    F::ONE
                } else {
                    F::ZERO
                }
            })
            .collect::<Vec<_>>();
        writer.write_array(&self.bits, &bits)
    }
}
