use anyhow::{bail, Result};
use num::Zero;
use serde::{Deserialize, Serialize};

use super::limbs::{limbs_to_biguint, to_limbs_polynomial};
use super::parameters::FieldParameters;
use super::register::FieldRegister;
use crate::air::parser::AirParser;
use crate::air::AirConstraint;
use crate::chip::builder::AirBuilder;
use crate::chip::instruction::Instruction;
use crate::chip::trace::writer::TraceWriter;
use crate::chip::AirParameters;
use crate::math::prelude::*;

/// Witnesses `result = a^(-1) mod p`.
///
/// Emits no constraint. With `allow_zero` set, `a = 0` yields `result = 0`; otherwise the witness
/// pass fails on a zero input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FpInverseHint<P: FieldParameters> {
    a: FieldRegister<P>,
    pub result: FieldRegister<P>,
    allow_zero: bool,
}

impl<L: AirParameters> AirBuilder<L> {
    pub fn fp_inverse_hint<P: FieldParameters>(
        &mut self,
        a: &FieldRegister<P>,
        allow_zero: bool,
    ) -> FieldRegister<P>
    where
        L::Instruction: From<FpInverseHint<P>>,
    {
        self.check_field::<P>();
        let result = self.alloc::<FieldRegister<P>>();
        let instr = FpInverseHint {
            a: *a,
            result,
            allow_zero,
        };
        self.register_instruction(instr);
        result
    }
}

impl<AP: AirParser, P: FieldParameters> AirConstraint<AP> for FpInverseHint<P> {
    fn eval(&self, _parser: &mut AP) {}
}

impl<F: PrimeField64, P: FieldParameters> Instruction<F> for FpInverseHint<P> {
    fn write(&self, writer: &mut TraceWriter<F>) -> Result<()> {
        let p_a = writer.read(&self.a)?;
        let modulus = P::modulus();
        let a = limbs_to_biguint(p_a.as_slice(), P::NB_BITS_PER_LIMB) % &modulus;

        let inverse = if a.is_zero() {
            if !self.allow_zero {
                bail!("division by zero");
            }
            a
        } else {
            a.modpow(&(&modulus - 2u32), &modulus)
        };
        writer.write(&self.result, &to_limbs_polynomial::<F, P>(&inverse))
    }
}
