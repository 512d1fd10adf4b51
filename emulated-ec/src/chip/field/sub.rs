use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use super::add::FpAddInstruction;
use super::limbs::{limbs_to_biguint, to_limbs_polynomial};
use super::parameters::FieldParameters;
use super::register::FieldRegister;
use crate::air::AirConstraint;
use crate::chip::builder::AirBuilder;
use crate::chip::instruction::Instruction;
use crate::chip::register::limb::LimbRegister;
use crate::chip::trace::writer::TraceWriter;
use crate::chip::AirParameters;
use crate::math::prelude::*;
use crate::polynomial::parser::PolynomialParser;

/// Fp subtraction.
///
/// Proves `a - b = c` by asserting `b + c = a`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FpSubInstruction<P: FieldParameters> {
    inner: FpAddInstruction<P>,
}

impl<L: AirParameters> AirBuilder<L> {
    /// Given two field elements `a` and `b`, computes the difference `a - b = c`.
    pub fn fp_sub<P: FieldParameters>(
        &mut self,
        a: &FieldRegister<P>,
        b: &FieldRegister<P>,
    ) -> FieldRegister<P>
    where
        L::Instruction: From<FpSubInstruction<P>>,
    {
        let result = self.alloc::<FieldRegister<P>>();
        self.set_fp_sub(a, b, &result);
        result
    }

    pub fn set_fp_sub<P: FieldParameters>(
        &mut self,
        a: &FieldRegister<P>,
        b: &FieldRegister<P>,
        result: &FieldRegister<P>,
    ) where
        L::Instruction: From<FpSubInstruction<P>>,
    {
        self.check_field::<P>();
        let carry = self.alloc::<FieldRegister<P>>();
        let witness_low = self.alloc_array::<LimbRegister<P>>(P::NB_WITNESS_LIMBS);
        let witness_high = self.alloc_array::<LimbRegister<P>>(P::NB_WITNESS_LIMBS);
        let inner = FpAddInstruction {
            a: *b,
            b: *result,
            result: *a,
            carry,
            witness_low,
            witness_high,
        };
        self.register_instruction(FpSubInstruction { inner });
    }
}

impl<AP: PolynomialParser, P: FieldParameters> AirConstraint<AP> for FpSubInstruction<P> {
    fn eval(&self, parser: &mut AP) {
        self.inner.eval(parser);
    }
}

impl<F: PrimeField64, P: FieldParameters> Instruction<F> for FpSubInstruction<P> {
    fn write(&self, writer: &mut TraceWriter<F>) -> Result<()> {
        let p_b = writer.read(&self.inner.a)?;
        let p_a = writer.read(&self.inner.result)?;

        let b = limbs_to_biguint(p_b.as_slice(), P::NB_BITS_PER_LIMB);
        let a = limbs_to_biguint(p_a.as_slice(), P::NB_BITS_PER_LIMB);

        let modulus = P::modulus();
        let c = (&modulus + &a % &modulus - &b % &modulus) % &modulus;
        ensure!(
            &b + &c >= a,
            "subtraction operand {a} is not reduced modulo {modulus}"
        );
        let carry = (&b + &c - &a) / &modulus;

        let p_c = to_limbs_polynomial::<F, P>(&c);
        writer.write(&self.inner.b, &p_c)?;
        self.inner
            .write_carry_and_witness(writer, &p_b, &p_c, &p_a, &carry)
    }
}

#[cfg(test)]
mod tests {
    use num::BigUint;

    use super::*;
    use crate::chip::builder::tests::*;
    use crate::chip::ec::weierstrass::secp256k1::Secp256k1BaseField;
    use crate::chip::field::instruction::FpInstruction;

    #[test]
    fn test_fp_sub() {
        type F = GoldilocksField;
        type P = Secp256k1BaseField;
        type L = TestParameters<FpInstruction<P>>;

        let p = P::modulus();

        let mut builder = AirBuilder::<L>::new();
        let a = builder.alloc::<FieldRegister<P>>();
        let b = builder.alloc::<FieldRegister<P>>();
        let c = builder.fp_sub(&a, &b);
        let chip = builder.build().unwrap();

        let cases = [
            (P::rand(), P::rand()),
            (BigUint::from(0u32), &p - 1u32),
            (BigUint::from(5u32), BigUint::from(5u32)),
        ];
        for (a_int, b_int) in cases {
            let mut writer = chip.new_writer(20).unwrap();
            writer.write(&a, &to_limbs_polynomial::<F, P>(&a_int)).unwrap();
            writer.write(&b, &to_limbs_polynomial::<F, P>(&b_int)).unwrap();
            chip.write_witness(&mut writer).unwrap();

            let c_value = writer.read(&c).unwrap();
            let expected = (&p + &a_int - &b_int) % &p;
            assert_eq!(limbs_to_biguint(c_value.as_slice(), 16), expected);
            check_circuit(&chip, &writer);
        }
    }
}
