//! Scalar multiplication with a folded scalar and signed base-4 digits.
//!
//! The scalar `s` is first folded into `c = min(s, n - s) <= (n - 1) / 2`, negating the point when
//! `s` is the larger half. The odd integer `c | 1` is then written as `sum_i d_i * 4^i` with every
//! digit in `{-3, -1, 1, 3}`, read off directly from the bits of `c`: below the top, the digit of
//! position `i` is `d_i = 2 * c_(2i+1) + 4 * c_(2i+2) - 3`. The top digit is `1 + 2 * c_(2m-1)` and
//! is always positive. An even `c` is fixed up by a final complete subtraction of the point.

use core::marker::PhantomData;

use num::BigUint;

use super::WeierstrassParameters;
use crate::chip::builder::AirBuilder;
use crate::chip::component::Component;
use crate::chip::ec::gadget::EllipticCurveGadget;
use crate::chip::ec::instruction::FromECInstruction;
use crate::chip::ec::point::AffinePointRegister;
use crate::chip::field::limbs::encode_limbs;
use crate::chip::field::parameters::FieldParameters;
use crate::chip::field::register::FieldRegister;
use crate::chip::register::bit::BitRegister;
use crate::chip::register::element::ElementRegister;
use crate::chip::register::{Register, RegisterSerializable};
use crate::chip::uint::add::LimbOperand;
use crate::chip::AirParameters;

impl<L: AirParameters> AirBuilder<L> {
    /// `bit ? a : b` for points.
    pub fn sw_select<E: WeierstrassParameters>(
        &mut self,
        bit: &BitRegister,
        a: &AffinePointRegister<E>,
        b: &AffinePointRegister<E>,
    ) -> AffinePointRegister<E> {
        let x = self.select(bit, &a.x, &b.x);
        let y = self.select(bit, &a.y, &b.y);
        AffinePointRegister::new(x, y)
    }

    /// Folds a canonical scalar `s` into `c = min(s, n - s)`.
    ///
    /// Returns `(negate, c)` where `negate` is set when `c = n - s`. The fold is unique: `c` is
    /// constrained to be at most `(n - 1) / 2`, and only one of `s` and `n - s` can be.
    fn sw_fold_scalar<E: WeierstrassParameters>(
        &mut self,
        scalar: &FieldRegister<E::ScalarField>,
    ) -> (BitRegister, FieldRegister<E::ScalarField>) {
        let nb_bits = E::ScalarField::NB_BITS_PER_LIMB;
        let nb_limbs = E::ScalarField::NB_LIMBS;
        let order = E::prime_group_order();
        let half: BigUint = (&order - 1u32) >> 1;

        self.fp_assert_canonical(scalar);

        // scalar + complement = n
        let complement = self.alloc::<FieldRegister<E::ScalarField>>();
        self.limb_add(
            scalar.register(),
            LimbOperand::Register(*complement.register()),
            LimbOperand::Constant(encode_limbs(&order, nb_bits, nb_limbs)),
            nb_bits,
        );

        let negate = self.greater_than_hint(scalar.register(), &half, nb_bits);
        let folded = self.select(&negate, &complement, scalar);

        // folded + slack = (n - 1) / 2
        let slack = self.alloc::<FieldRegister<E::ScalarField>>();
        self.limb_add(
            folded.register(),
            LimbOperand::Register(*slack.register()),
            LimbOperand::Constant(encode_limbs(&half, nb_bits, nb_limbs)),
            nb_bits,
        );

        (negate, folded)
    }

    /// Computes `scalar * point`.
    ///
    /// The scalar is a canonical residue modulo the group order and the point is any point of
    /// the curve other than the identity. A zero scalar yields the identity `(0, 0)`.
    pub fn sw_scalar_mul<E: WeierstrassParameters>(
        &mut self,
        scalar: &FieldRegister<E::ScalarField>,
        point: &AffinePointRegister<E>,
    ) -> AffinePointRegister<E>
    where
        L::Instruction: FromECInstruction<E>,
    {
        let nb_bits = E::ScalarField::NB_BITS_PER_LIMB;
        let half: BigUint = (E::prime_group_order() - 1u32) >> 1;
        let nb_digits = (half.bits() as usize).div_ceil(2).max(1);

        let (negate, folded) = self.sw_fold_scalar::<E>(scalar);

        let mut bits = Vec::with_capacity(E::ScalarField::nb_bits());
        for i in 0..E::ScalarField::NB_LIMBS {
            let limb = ElementRegister::from_register(folded.register().get(i));
            bits.extend(self.bit_decomposition(&limb, nb_bits).iter());
        }

        // The odd multiples 1, 3, -1, -3 of the signed point.
        let a = self.fp_constant::<E::BaseField>(&E::a_int());
        let neg_y = self.fp_neg(&point.y);
        let y = self.select(&negate, &neg_y, &point.y);
        let p_1 = AffinePointRegister::new(point.x, y);
        let p_2 = self.sw_double(&p_1, &a);
        let p_3 = self.sw_add(&p_2, &p_1);
        let neg_p_1 = self.sw_neg(&p_1);
        let neg_p_3 = self.sw_neg(&p_3);

        let mut acc = self.sw_select(&bits[2 * nb_digits - 1], &p_3, &p_1);
        for i in (0..nb_digits - 1).rev() {
            let positive = self.sw_select(&bits[2 * i + 1], &p_3, &p_1);
            let negative = self.sw_select(&bits[2 * i + 1], &neg_p_1, &neg_p_3);
            let digit = self.sw_select(&bits[2 * i + 2], &positive, &negative);

            acc = self.sw_double(&acc, &a);
            acc = self.sw_double_and_add(&acc, &digit);
        }

        let even = self.sw_full_add(&acc, &neg_p_1);
        let result = self.sw_select(&bits[0], &acc, &even);
        self.fp_assert_canonical(&result.x);
        self.fp_assert_canonical(&result.y);
        result
    }

    /// Like [`AirBuilder::sw_scalar_mul`], with the product copied into preallocated registers.
    pub fn set_sw_scalar_mul<E: WeierstrassParameters>(
        &mut self,
        scalar: &FieldRegister<E::ScalarField>,
        point: &AffinePointRegister<E>,
        result: &AffinePointRegister<E>,
    ) where
        L::Instruction: FromECInstruction<E>,
    {
        let product = self.sw_scalar_mul(scalar, point);
        self.set_to_copy(&product.x, &result.x);
        self.set_to_copy(&product.y, &result.y);
    }
}

/// Scalar multiplication of an allocated point by an allocated scalar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SWScalarMul<E>(PhantomData<E>);

impl<L: AirParameters, E: WeierstrassParameters> Component<L> for SWScalarMul<E>
where
    L::Instruction: FromECInstruction<E>,
{
    type Input = (FieldRegister<E::ScalarField>, AffinePointRegister<E>);
    type Output = AffinePointRegister<E>;

    fn alloc_input(builder: &mut AirBuilder<L>) -> Self::Input {
        (builder.alloc(), builder.alloc_ec_point())
    }

    fn generate(builder: &mut AirBuilder<L>, input: &Self::Input) -> Self::Output {
        builder.sw_scalar_mul(&input.0, &input.1)
    }
}

#[cfg(test)]
mod tests {
    use num::bigint::RandBigInt;
    use num::Zero;
    use rand::thread_rng;

    use super::*;
    use crate::chip::builder::tests::*;
    use crate::chip::constraint::{CircuitDescription, ConstraintFailure};
    use crate::chip::ec::gadget::EllipticCurveWriter;
    use crate::chip::ec::instruction::ECInstruction;
    use crate::chip::ec::point::AffinePoint;
    use crate::chip::ec::weierstrass::curve32::Curve32;
    use crate::chip::ec::weierstrass::secp256k1::Secp256k1;
    use crate::chip::ec::EllipticCurveParameters;
    use crate::chip::field::limbs::to_limbs_polynomial;
    use crate::chip::layout::Layout;
    use crate::chip::trace::writer::TraceWriter;
    use crate::chip::Chip;
    use crate::math::prelude::*;
    use crate::utils::log::setup_logger;

    type F = GoldilocksField;

    struct ScalarMulCircuit<E: WeierstrassParameters> {
        chip: Chip<TestParameters<ECInstruction<E>>>,
        scalar: FieldRegister<E::ScalarField>,
        point: AffinePointRegister<E>,
        result: AffinePointRegister<E>,
    }

    impl<E: WeierstrassParameters> ScalarMulCircuit<E> {
        fn new() -> Self {
            let mut builder = AirBuilder::<TestParameters<ECInstruction<E>>>::new();
            let scalar = builder.alloc::<FieldRegister<E::ScalarField>>();
            let point = builder.alloc_ec_point();
            let result = builder.sw_scalar_mul(&scalar, &point);
            let chip = builder.build().unwrap();
            Self {
                chip,
                scalar,
                point,
                result,
            }
        }

        fn witness(
            &self,
            width: usize,
            scalar: &BigUint,
            point: &AffinePoint<E>,
        ) -> TraceWriter<F> {
            let mut writer = self.chip.new_writer(width).unwrap();
            writer
                .write(
                    &self.scalar,
                    &to_limbs_polynomial::<F, E::ScalarField>(scalar),
                )
                .unwrap();
            writer.write_ec_point(&self.point, point).unwrap();
            self.chip.write_witness(&mut writer).unwrap();
            writer
        }

        fn run(&self, width: usize, scalar: &BigUint, point: &AffinePoint<E>) -> AffinePoint<E> {
            let writer = self.witness(width, scalar, point);
            check_circuit(&self.chip, &writer);
            writer.read_ec_point(&self.result).unwrap()
        }
    }

    #[test]
    fn test_sw_scalar_mul_curve32() {
        setup_logger();
        type E = Curve32;
        let circuit = ScalarMulCircuit::<E>::new();

        let n = E::prime_group_order();
        let half: BigUint = (&n - 1u32) >> 1;
        let mut rng = thread_rng();
        let point = E::generator().sw_scalar_mul(&rng.gen_biguint_below(&n));

        let scalars = [
            BigUint::zero(),
            BigUint::from(1u32),
            BigUint::from(2u32),
            BigUint::from(3u32),
            half.clone(),
            &half + 1u32,
            &n - 2u32,
            &n - 1u32,
            rng.gen_biguint_below(&n),
        ];
        for scalar in scalars {
            let value = circuit.run(16, &scalar, &point);
            assert_eq!(value, point.sw_scalar_mul(&scalar), "scalar {scalar}");
        }
        assert!(circuit.run(16, &BigUint::zero(), &point).is_identity());
    }

    #[test]
    fn test_set_sw_scalar_mul() {
        type E = Curve32;
        let mut builder = AirBuilder::<TestParameters<ECInstruction<E>>>::new();
        let scalar = builder.alloc::<FieldRegister<<E as EllipticCurveParameters>::ScalarField>>();
        let point = builder.alloc_ec_point();
        let target = builder.alloc_ec_point();
        builder.set_sw_scalar_mul(&scalar, &point, &target);
        let chip = builder.build().unwrap();

        let n = E::prime_group_order();
        let mut rng = thread_rng();
        let point_int = E::generator().sw_scalar_mul(&rng.gen_biguint_below(&n));
        let scalar_int = rng.gen_biguint_below(&n);

        let width = 8;
        let mut writer = chip.new_writer(width).unwrap();
        writer
            .write(
                &scalar,
                &to_limbs_polynomial::<F, <E as EllipticCurveParameters>::ScalarField>(
                    &scalar_int,
                ),
            )
            .unwrap();
        writer.write_ec_point(&point, &point_int).unwrap();
        chip.write_witness(&mut writer).unwrap();
        check_circuit(&chip, &writer);

        let value: AffinePoint<E> = writer.read_ec_point(&target).unwrap();
        assert_eq!(value, point_int.sw_scalar_mul(&scalar_int));

        // A copied cell that disagrees with the product breaks a copy constraint.
        let mut table = writer.into_table();
        let cell = Layout::new(width)
            .unwrap()
            .cell(target.x.register().start());
        let copied = table.get(cell).unwrap();
        table.overwrite(cell, copied + F::ONE);

        let mut circuit = CircuitDescription::new();
        chip.emit_constraints(width, &mut circuit).unwrap();
        let failures = circuit.failures(&table);
        assert!(failures
            .iter()
            .any(|failure| matches!(failure, ConstraintFailure::Copy { .. })));
    }

    #[test]
    fn test_sw_scalar_mul_secp256k1() {
        setup_logger();
        type E = Secp256k1;
        let circuit = ScalarMulCircuit::<E>::new();

        let scalar = <E as EllipticCurveParameters>::ScalarField::rand();
        let point = E::generator();
        let value = circuit.run(32, &scalar, &point);
        assert_eq!(value, point.sw_scalar_mul(&scalar));
    }

    #[test]
    fn test_sw_scalar_mul_fold() {
        type E = Curve32;
        let circuit = ScalarMulCircuit::<E>::new();

        let n = E::prime_group_order();
        let mut rng = thread_rng();
        let point = E::generator().sw_scalar_mul(&rng.gen_biguint_below(&n));
        for scalar in [BigUint::from(5u32), rng.gen_biguint_below(&n)] {
            let complement = &n - &scalar;
            let direct = circuit.run(8, &scalar, &point);
            let mirrored = circuit.run(8, &complement, &point.sw_neg());
            assert_eq!(direct, mirrored);
            assert_eq!(circuit.run(8, &complement, &point), direct.sw_neg());
        }
    }

    #[test]
    fn test_sw_scalar_mul_rejects_unreduced_scalar() {
        type E = Curve32;
        let circuit = ScalarMulCircuit::<E>::new();

        let n = E::prime_group_order();
        let mut writer = circuit.chip.new_writer(8).unwrap();
        writer
            .write(
                &circuit.scalar,
                &to_limbs_polynomial::<F, <E as EllipticCurveParameters>::ScalarField>(&n),
            )
            .unwrap();
        writer
            .write_ec_point(&circuit.point, &E::generator())
            .unwrap();
        assert!(circuit.chip.write_witness(&mut writer).is_err());
    }

    #[test]
    fn test_sw_scalar_mul_rows_amount() {
        type E = Curve32;
        type L = TestParameters<ECInstruction<E>>;
        let circuit = ScalarMulCircuit::<E>::new();

        let scalar = BigUint::from(1234567u32);
        let point = E::generator();
        for width in 4..=32 {
            let writer = circuit.witness(width, &scalar, &point);
            let mut description = CircuitDescription::new();
            circuit
                .chip
                .emit_constraints(width, &mut description)
                .unwrap();

            let rows = <SWScalarMul<E> as Component<L>>::rows_amount(width).unwrap();
            assert_eq!(writer.table().num_rows(), rows);
            assert_eq!(description.rows_amount(), rows);
            assert_eq!(circuit.chip.rows_amount(width).unwrap(), rows);
        }
    }

    #[test]
    fn test_sw_scalar_mul_manifest() {
        type E = Secp256k1;
        type L = TestParameters<ECInstruction<E>>;

        let manifest = <SWScalarMul<E> as Component<L>>::manifest();
        assert_eq!(
            manifest.min_width,
            <E as EllipticCurveParameters>::BaseField::NB_LIMBS
        );
        assert!(manifest.check(manifest.min_width - 1).is_err());
        assert!(manifest.check(manifest.min_width).is_ok());
    }
}
