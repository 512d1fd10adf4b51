use anyhow::Result;
use num::BigUint;
use serde::{Deserialize, Serialize};

use super::limbs::{limbs_to_biguint, to_limbs_polynomial};
use super::parameters::FieldParameters;
use super::register::FieldRegister;
use super::util;
use crate::air::AirConstraint;
use crate::chip::builder::AirBuilder;
use crate::chip::instruction::Instruction;
use crate::chip::register::array::ArrayRegister;
use crate::chip::register::limb::LimbRegister;
use crate::chip::register::Register;
use crate::chip::trace::writer::TraceWriter;
use crate::chip::AirParameters;
use crate::math::prelude::*;
use crate::polynomial::parser::PolynomialParser;
use crate::polynomial::Polynomial;

/// `a + b = result (mod p)`, witnessed by `a + b - result - carry * p = 0` over the integers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FpAddInstruction<P: FieldParameters> {
    pub a: FieldRegister<P>,
    pub b: FieldRegister<P>,
    pub result: FieldRegister<P>,
    pub(crate) carry: FieldRegister<P>,
    pub(crate) witness_low: ArrayRegister<LimbRegister<P>>,
    pub(crate) witness_high: ArrayRegister<LimbRegister<P>>,
}

impl<L: AirParameters> AirBuilder<L> {
    /// Given two field elements `a` and `b`, computes the sum `a + b = c`.
    pub fn fp_add<P: FieldParameters>(
        &mut self,
        a: &FieldRegister<P>,
        b: &FieldRegister<P>,
    ) -> FieldRegister<P>
    where
        L::Instruction: From<FpAddInstruction<P>>,
    {
        let result = self.alloc::<FieldRegister<P>>();
        self.set_fp_add(a, b, &result);
        result
    }

    pub fn set_fp_add<P: FieldParameters>(
        &mut self,
        a: &FieldRegister<P>,
        b: &FieldRegister<P>,
        result: &FieldRegister<P>,
    ) where
        L::Instruction: From<FpAddInstruction<P>>,
    {
        self.check_field::<P>();
        let carry = self.alloc::<FieldRegister<P>>();
        let witness_low = self.alloc_array::<LimbRegister<P>>(P::NB_WITNESS_LIMBS);
        let witness_high = self.alloc_array::<LimbRegister<P>>(P::NB_WITNESS_LIMBS);
        let instr = FpAddInstruction {
            a: *a,
            b: *b,
            result: *result,
            carry,
            witness_low,
            witness_high,
        };
        self.register_instruction(instr);
    }
}

impl<AP: PolynomialParser, P: FieldParameters> AirConstraint<AP> for FpAddInstruction<P> {
    fn eval(&self, parser: &mut AP) {
        let p_a = self.a.eval(parser);
        let p_b = self.b.eval(parser);
        let p_result = self.result.eval(parser);
        let p_carry = self.carry.eval(parser);

        let p_a_plus_b = parser.poly_add(&p_a, &p_b);
        let p_a_plus_b_minus_result = parser.poly_sub(&p_a_plus_b, &p_result);
        let p_limbs = parser.constant_poly(&util::modulus_field_iter::<AP::Field, P>().collect());

        let p_mul_times_carry = parser.poly_mul(&p_carry, &p_limbs);
        let p_vanishing = parser.poly_sub(&p_a_plus_b_minus_result, &p_mul_times_carry);

        let p_witness_low = Polynomial::from_coefficients(self.witness_low.eval_vec(parser));
        let p_witness_high = Polynomial::from_coefficients(self.witness_high.eval_vec(parser));

        util::eval_field_operation::<AP, P>(parser, &p_vanishing, &p_witness_low, &p_witness_high)
    }
}

impl<P: FieldParameters> FpAddInstruction<P> {
    /// Writes the carry and the quotient witness for `a + b = result + carry * p`.
    pub(crate) fn write_carry_and_witness<F: PrimeField64>(
        &self,
        writer: &mut TraceWriter<F>,
        p_a: &Polynomial<F>,
        p_b: &Polynomial<F>,
        p_result: &Polynomial<F>,
        carry: &BigUint,
    ) -> Result<()> {
        let p_modulus = to_limbs_polynomial::<F, P>(&P::modulus());
        let p_carry = to_limbs_polynomial::<F, P>(carry);

        let p_vanishing = p_a + p_b - p_result - &(&p_carry * &p_modulus);
        let p_witness = util::compute_root_quotient_and_shift::<F, P>(&p_vanishing)?;
        let (p_witness_low, p_witness_high) = util::split_witness_limbs::<F, P>(&p_witness);

        writer.write(&self.carry, &p_carry)?;
        writer.write_array(&self.witness_low, &p_witness_low)?;
        writer.write_array(&self.witness_high, &p_witness_high)
    }
}

impl<F: PrimeField64, P: FieldParameters> Instruction<F> for FpAddInstruction<P> {
    fn write(&self, writer: &mut TraceWriter<F>) -> Result<()> {
        let p_a = writer.read(&self.a)?;
        let p_b = writer.read(&self.b)?;

        let a = limbs_to_biguint(p_a.as_slice(), P::NB_BITS_PER_LIMB);
        let b = limbs_to_biguint(p_b.as_slice(), P::NB_BITS_PER_LIMB);

        // Compute field addition in the integers.
        let modulus = P::modulus();
        let result = (&a + &b) % &modulus;
        let carry = (&a + &b - &result) / &modulus;

        let p_result = to_limbs_polynomial::<F, P>(&result);
        writer.write(&self.result, &p_result)?;
        self.write_carry_and_witness(writer, &p_a, &p_b, &p_result, &carry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chip::builder::tests::*;
    use crate::chip::ec::weierstrass::curve32::Curve32BaseField;
    use crate::chip::ec::weierstrass::secp256k1::Secp256k1BaseField;
    use crate::chip::field::instruction::FpInstruction;

    fn run_fp_add<P: FieldParameters>(width: usize, a_int: &BigUint, b_int: &BigUint) {
        type F = GoldilocksField;
        let mut builder = AirBuilder::<TestParameters<FpInstruction<P>>>::new();
        let a = builder.alloc::<FieldRegister<P>>();
        let b = builder.alloc::<FieldRegister<P>>();
        let c = builder.fp_add(&a, &b);
        let chip = builder.build().unwrap();

        let mut writer = chip.new_writer(width).unwrap();
        writer.write(&a, &to_limbs_polynomial::<F, P>(a_int)).unwrap();
        writer.write(&b, &to_limbs_polynomial::<F, P>(b_int)).unwrap();
        chip.write_witness(&mut writer).unwrap();

        let c_value = writer.read(&c).unwrap();
        let expected = (a_int + b_int) % P::modulus();
        assert_eq!(
            limbs_to_biguint(c_value.as_slice(), P::NB_BITS_PER_LIMB),
            expected
        );
        check_circuit(&chip, &writer);
    }

    #[test]
    fn test_fp_add() {
        for width in [16, 23, 40] {
            let a = Secp256k1BaseField::rand();
            let b = Secp256k1BaseField::rand();
            run_fp_add::<Secp256k1BaseField>(width, &a, &b);
        }
        let p = Curve32BaseField::modulus();
        let minus_one = &p - 1u32;
        run_fp_add::<Curve32BaseField>(4, &minus_one, &minus_one);
        run_fp_add::<Curve32BaseField>(7, &BigUint::from(0u32), &BigUint::from(0u32));
    }
}
