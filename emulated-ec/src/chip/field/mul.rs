use anyhow::{ensure, Result};
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

/// `a * b = result (mod p)`, witnessed by `a * b - result - carry * p = 0` over the integers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FpMulInstruction<P: FieldParameters> {
    a: FieldRegister<P>,
    b: FieldRegister<P>,
    pub result: FieldRegister<P>,
    carry: FieldRegister<P>,
    witness_low: ArrayRegister<LimbRegister<P>>,
    witness_high: ArrayRegister<LimbRegister<P>>,
}

impl<L: AirParameters> AirBuilder<L> {
    /// Given two field elements `a` and `b`, computes the product `a * b = c`.
    pub fn fp_mul<P: FieldParameters>(
        &mut self,
        a: &FieldRegister<P>,
        b: &FieldRegister<P>,
    ) -> FieldRegister<P>
    where
        L::Instruction: From<FpMulInstruction<P>>,
    {
        let result = self.alloc::<FieldRegister<P>>();
        self.set_fp_mul(a, b, &result);
        result
    }

    pub fn set_fp_mul<P: FieldParameters>(
        &mut self,
        a: &FieldRegister<P>,
        b: &FieldRegister<P>,
        result: &FieldRegister<P>,
    ) where
        L::Instruction: From<FpMulInstruction<P>>,
    {
        self.check_field::<P>();
        let carry = self.alloc::<FieldRegister<P>>();
        let witness_low = self.alloc_array::<LimbRegister<P>>(P::NB_WITNESS_LIMBS);
        let witness_high = self.alloc_array::<LimbRegister<P>>(P::NB_WITNESS_LIMBS);
        let instr = FpMulInstruction {
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

impl<AP: PolynomialParser, P: FieldParameters> AirConstraint<AP> for FpMulInstruction<P> {
    fn eval(&self, parser: &mut AP) {
        let p_a = self.a.eval(parser);
        let p_b = self.b.eval(parser);
        let p_result = self.result.eval(parser);
        let p_carry = self.carry.eval(parser);

        let p_a_mul_b = parser.poly_mul(&p_a, &p_b);
        let p_a_mul_b_minus_result = parser.poly_sub(&p_a_mul_b, &p_result);
        let p_limbs = parser.constant_poly(&util::modulus_field_iter::<AP::Field, P>().collect());

        let p_mul_times_carry = parser.poly_mul(&p_carry, &p_limbs);
        let p_vanishing = parser.poly_sub(&p_a_mul_b_minus_result, &p_mul_times_carry);

        let p_witness_low = Polynomial::from_coefficients(self.witness_low.eval_vec(parser));
        let p_witness_high = Polynomial::from_coefficients(self.witness_high.eval_vec(parser));

        util::eval_field_operation::<AP, P>(parser, &p_vanishing, &p_witness_low, &p_witness_high)
    }
}

impl<F: PrimeField64, P: FieldParameters> Instruction<F> for FpMulInstruction<P> {
    fn write(&self, writer: &mut TraceWriter<F>) -> Result<()> {
        let p_a = writer.read(&self.a)?;
        let p_b = writer.read(&self.b)?;

        let a = limbs_to_biguint(p_a.as_slice(), P::NB_BITS_PER_LIMB);
        let b = limbs_to_biguint(p_b.as_slice(), P::NB_BITS_PER_LIMB);

        // Compute field multiplication in the integers.
        let modulus = P::modulus();
        let result = (&a * &b) % &modulus;
        let carry = (&a * &b - &result) / &modulus;
        ensure!(
            carry.bits() as usize <= P::nb_bits(),
            "multiplication operands are not reduced modulo {modulus}"
        );

        let p_modulus = to_limbs_polynomial::<F, P>(&modulus);
        let p_result = to_limbs_polynomial::<F, P>(&result);
        let p_carry = to_limbs_polynomial::<F, P>(&carry);

        let p_vanishing = &(&p_a * &p_b) - &p_result - &(&p_carry * &p_modulus);
        let p_witness = util::compute_root_quotient_and_shift::<F, P>(&p_vanishing)?;
        let (p_witness_low, p_witness_high) = util::split_witness_limbs::<F, P>(&p_witness);

        writer.write(&self.result, &p_result)?;
        writer.write(&self.carry, &p_carry)?;
        writer.write_array(&self.witness_low, &p_witness_low)?;
        writer.write_array(&self.witness_high, &p_witness_high)
    }
}

#[cfg(test)]
mod tests {
    use num::BigUint;

    use super::*;
    use crate::chip::builder::tests::*;
    use crate::chip::constraint::ConstraintFailure;
    use crate::chip::ec::weierstrass::curve32::Curve32BaseField;
    use crate::chip::ec::weierstrass::secp256k1::Secp256k1BaseField;
    use crate::chip::field::instruction::FpInstruction;
    use crate::chip::register::RegisterSerializable;

    fn mul_chip<P: FieldParameters>() -> (
        crate::chip::Chip<TestParameters<FpInstruction<P>>>,
        FieldRegister<P>,
        FieldRegister<P>,
        FieldRegister<P>,
    ) {
        let mut builder = AirBuilder::<TestParameters<FpInstruction<P>>>::new();
        let a = builder.alloc::<FieldRegister<P>>();
        let b = builder.alloc::<FieldRegister<P>>();
        let c = builder.fp_mul(&a, &b);
        (builder.build().unwrap(), a, b, c)
    }

    #[test]
    fn test_fp_mul() {
        type F = GoldilocksField;
        type P = Secp256k1BaseField;

        let p = P::modulus();
        let (chip, a, b, c) = mul_chip::<P>();
        let cases = [
            (P::rand(), P::rand()),
            (&p - 1u32, &p - 1u32),
            (BigUint::from(0u32), P::rand()),
        ];
        for (width, (a_int, b_int)) in [16, 31, 64].into_iter().zip(cases) {
            let mut writer = chip.new_writer(width).unwrap();
            writer.write(&a, &to_limbs_polynomial::<F, P>(&a_int)).unwrap();
            writer.write(&b, &to_limbs_polynomial::<F, P>(&b_int)).unwrap();
            chip.write_witness(&mut writer).unwrap();

            let c_value = writer.read(&c).unwrap();
            assert_eq!(
                limbs_to_biguint(c_value.as_slice(), P::NB_BITS_PER_LIMB),
                (&a_int * &b_int) % &p
            );
            check_circuit(&chip, &writer);
        }
    }

    #[test]
    fn test_fp_mul_out_of_range_limb() {
        type F = GoldilocksField;
        type P = Curve32BaseField;

        let (chip, a, b, _) = mul_chip::<P>();
        let mut writer = chip.new_writer(4).unwrap();
        // 2^16 in the low limb decodes to the same integer as the canonical (0, 1).
        let a_value = [F::from_canonical_u64(1 << 16), F::ZERO];
        writer.write_slice(a.register(), &a_value).unwrap();
        writer
            .write(&b, &to_limbs_polynomial::<F, P>(&BigUint::from(3u32)))
            .unwrap();
        chip.write_witness(&mut writer).unwrap();

        let failures = circuit_failures(&chip, &writer);
        assert!(!failures.is_empty());
        assert!(failures
            .iter()
            .all(|failure| matches!(failure, ConstraintFailure::Lookup { .. })));
    }
}
