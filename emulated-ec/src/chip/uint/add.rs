use anyhow::{bail, ensure, Result};
use num::BigUint;
use serde::{Deserialize, Serialize};

use crate::air::parser::AirParser;
use crate::air::AirConstraint;
use crate::chip::builder::AirBuilder;
use crate::chip::field::limbs::{decode_limbs, encode_limbs};
use crate::chip::instruction::set::AirInstruction;
use crate::chip::instruction::Instruction;
use crate::chip::register::array::ArrayRegister;
use crate::chip::register::bit::BitRegister;
use crate::chip::register::memory::CellSlice;
use crate::chip::trace::writer::TraceWriter;
use crate::chip::AirParameters;
use crate::math::prelude::*;

/// A limb sequence held either in cells or as constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LimbOperand {
    Register(CellSlice),
    Constant(Vec<u64>),
}

impl LimbOperand {
    pub fn len(&self) -> usize {
        match self {
            LimbOperand::Register(slice) => slice.len(),
            LimbOperand::Constant(limbs) => limbs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn eval<AP: AirParser>(&self, parser: &mut AP) -> Vec<AP::Var> {
        match self {
            LimbOperand::Register(slice) => slice.eval_slice(parser).to_vec(),
            LimbOperand::Constant(limbs) => limbs
                .iter()
                .map(|limb| parser.constant(AP::Field::from_canonical_u64(*limb)))
                .collect(),
        }
    }

    fn read<F: PrimeField64>(&self, writer: &TraceWriter<F>) -> Result<Vec<u64>> {
        match self {
            LimbOperand::Register(slice) => Ok(writer
                .read_slice(slice)?
                .iter()
                .map(|x| x.to_canonical_u64())
                .collect()),
            LimbOperand::Constant(limbs) => Ok(limbs.clone()),
        }
    }
}

/// Integer addition `a + b = result` over `k` limbs with boolean carries.
///
/// No carry leaves the top limb, so the sum must fit in `k` limbs. When `result` is a register
/// the witness pass writes it from `a` and `b`; when `result` is a constant and `b` a register,
/// it writes `b = result - a` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimbAddInstruction {
    a: CellSlice,
    b: LimbOperand,
    result: LimbOperand,
    carries: ArrayRegister<BitRegister>,
    nb_bits: usize,
}

impl<L: AirParameters> AirBuilder<L> {
    pub fn limb_add(
        &mut self,
        a: &CellSlice,
        b: LimbOperand,
        result: LimbOperand,
        nb_bits: usize,
    ) -> LimbAddInstruction {
        let nb_limbs = a.len();
        assert!(nb_limbs > 0, "limb addition needs at least one limb");
        assert_eq!(b.len(), nb_limbs, "operand length mismatch");
        assert_eq!(result.len(), nb_limbs, "result length mismatch");

        let carries = self.alloc_array::<BitRegister>(nb_limbs - 1);
        let instr = LimbAddInstruction {
            a: *a,
            b,
            result,
            carries,
            nb_bits,
        };
        self.register_air_instruction(AirInstruction::LimbAdd(instr.clone()));
        instr
    }
}

impl<AP: AirParser> AirConstraint<AP> for LimbAddInstruction {
    fn eval(&self, parser: &mut AP) {
        let a = self.a.eval_slice(parser).to_vec();
        let b = self.b.eval(parser);
        let result = self.result.eval(parser);
        let carries = self.carries.eval_vec(parser);
        let base = AP::Field::from_canonical_u64(1 << self.nb_bits);

        // a_i + b_i + carry_{i-1} = result_i + carry_i * 2^b
        for i in 0..a.len() {
            let mut lhs = parser.add(a[i], b[i]);
            if i > 0 {
                lhs = parser.add(lhs, carries[i - 1]);
            }
            let mut rhs = result[i];
            if i < carries.len() {
                let shifted = parser.mul_const(carries[i], base);
                rhs = parser.add(rhs, shifted);
            }
            let constraint = parser.sub(lhs, rhs);
            parser.constraint(constraint);
        }
    }
}

impl<F: PrimeField64> Instruction<F> for LimbAddInstruction {
    fn write(&self, writer: &mut TraceWriter<F>) -> Result<()> {
        let nb_limbs = self.a.len();
        let a = LimbOperand::Register(self.a).read(writer)?;
        let a_int = decode_limbs(&a, self.nb_bits);

        let (b, result) = match (&self.b, &self.result) {
            (b_operand, LimbOperand::Register(result_slice)) => {
                let b = b_operand.read(writer)?;
                let sum = &a_int + decode_limbs(&b, self.nb_bits);
                ensure!(
                    sum.bits() as usize <= nb_limbs * self.nb_bits,
                    "limb addition overflows {nb_limbs} limbs"
                );
                let result = encode_limbs(&sum, self.nb_bits, nb_limbs);
                writer.write_slice(result_slice, &to_field(&result))?;
                (b, result)
            }
            (LimbOperand::Register(b_slice), LimbOperand::Constant(result)) => {
                let result_int = decode_limbs(result, self.nb_bits);
                ensure!(
                    a_int <= result_int,
                    "limb subtraction underflows: {a_int} > {result_int}"
                );
                let difference: BigUint = result_int - &a_int;
                let b = encode_limbs(&difference, self.nb_bits, nb_limbs);
                writer.write_slice(b_slice, &to_field(&b))?;
                (b, result.clone())
            }
            (LimbOperand::Constant(b), LimbOperand::Constant(result)) => (b.clone(), result.clone()),
        };

        let mut carry = 0u64;
        let mut carries = Vec::with_capacity(self.carries.len());
        for i in 0..nb_limbs {
            let lhs = a[i] + b[i] + carry;
            let Some(excess) = lhs.checked_sub(result[i]) else {
                bail!("limb {i} of the sum is inconsistent");
            };
            carry = excess >> self.nb_bits;
            ensure!(
                excess == carry << self.nb_bits && carry <= 1,
                "limb {i} of the sum is inconsistent"
            );
            if i + 1 < nb_limbs {
                carries.push(F::from_canonical_u64(carry));
            } else {
                ensure!(carry == 0, "limb addition overflows {nb_limbs} limbs");
            }
        }
        writer.write_array(&self.carries, &carries)
    }
}

fn to_field<F: Field>(limbs: &[u64]) -> Vec<F> {
    limbs.iter().map(|x| F::from_canonical_u64(*x)).collect()
}
