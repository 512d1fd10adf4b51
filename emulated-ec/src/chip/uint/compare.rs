use anyhow::Result;
use num::BigUint;
use serde::{Deserialize, Serialize};

use crate::air::parser::AirParser;
use crate::air::AirConstraint;
use crate::chip::builder::AirBuilder;
use crate::chip::field::limbs::{decode_limbs, encode_limbs};
use crate::chip::instruction::set::AirInstruction;
use crate::chip::instruction::Instruction;
use crate::chip::register::bit::BitRegister;
use crate::chip::register::memory::CellSlice;
use crate::chip::trace::writer::TraceWriter;
use crate::chip::AirParameters;
use crate::math::prelude::*;

/// Witnesses `result = (value > bound)` for a limb sequence.
///
/// This is a hint only: it emits no constraint, so the caller must bind `result` with a check
/// that fails for the wrong choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreaterThanHint {
    value: CellSlice,
    bound: Vec<u64>,
    nb_bits: usize,
    pub result: BitRegister,
}

impl<L: AirParameters> AirBuilder<L> {
    pub fn greater_than_hint(
        &mut self,
        value: &CellSlice,
        bound: &BigUint,
        nb_bits: usize,
    ) -> BitRegister {
        let result = self.alloc::<BitRegister>();
        let instr = GreaterThanHint {
            value: *value,
            bound: encode_limbs(bound, nb_bits, value.len()),
            nb_bits,
            result,
        };
        self.register_air_instruction(AirInstruction::GreaterThan(instr));
        result
    }
}

impl<AP: AirParser> AirConstraint<AP> for GreaterThanHint {
    fn eval(&self, _parser: &mut AP) {}
}

impl<F: PrimeField64> Instruction<F> for GreaterThanHint {
    fn write(&self, writer: &mut TraceWriter<F>) -> Result<()> {
        let value = writer
            .read_slice(&self.value)?
            .iter()
            .map(|x| x.to_canonical_u64())
            .collect::<Vec<_>>();
        let greater = decode_limbs(&value, self.nb_bits) > decode_limbs(&self.bound, self.nb_bits);
        writer.write(&self.result, &F::from_bool(greater))
    }
}
