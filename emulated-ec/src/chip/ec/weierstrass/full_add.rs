use core::marker::PhantomData;

use anyhow::Result;
use num::{BigUint, Zero};
use serde::{Deserialize, Serialize};

use super::WeierstrassParameters;
use crate::air::parser::AirParser;
use crate::air::AirConstraint;
use crate::chip::builder::AirBuilder;
use crate::chip::component::Component;
use crate::chip::ec::gadget::{EllipticCurveGadget, EllipticCurveWriter};
use crate::chip::ec::instruction::FromECInstruction;
use crate::chip::ec::point::AffinePointRegister;
use crate::chip::field::limbs::to_limbs_polynomial;
use crate::chip::field::parameters::FieldParameters;
use crate::chip::field::register::FieldRegister;
use crate::chip::instruction::Instruction;
use crate::chip::trace::writer::TraceWriter;
use crate::chip::AirParameters;
use crate::math::prelude::*;

/// Witnesses the slope used by [`AirBuilder::sw_full_add`].
///
/// The slope is `(q.y - p.y) / (q.x - p.x)` for distinct abscissas, the tangent slope when
/// `p = q` is a finite point with `p.y != 0`, and zero otherwise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct SWSlopeHint<E: WeierstrassParameters> {
    p: AffinePointRegister<E>,
    q: AffinePointRegister<E>,
    pub result: FieldRegister<E::BaseField>,
}

/// The registers of a complete addition.
#[derive(Debug, Clone, Copy)]
pub struct SWFullAddGadget<E: WeierstrassParameters> {
    pub result: AffinePointRegister<E>,
    pub slope: FieldRegister<E::BaseField>,
    /// `p.y = 0`, which marks `p` as the identity.
    pub p_is_identity: FieldRegister<E::BaseField>,
    /// `q.y = 0`, which marks `q` as the identity.
    pub q_is_identity: FieldRegister<E::BaseField>,
    /// `p.x = q.x`
    pub same_x: FieldRegister<E::BaseField>,
    /// `p.y + q.y = 0`
    pub opposite_y: FieldRegister<E::BaseField>,
}

impl<L: AirParameters> AirBuilder<L> {
    /// Adds two points with no restriction on their relative position.
    ///
    /// Identity operands, doubling and `p = -q` are all handled without branching: every case
    /// is computed and the result is picked by indicator blends.
    pub fn sw_full_add<E: WeierstrassParameters>(
        &mut self,
        p: &AffinePointRegister<E>,
        q: &AffinePointRegister<E>,
    ) -> AffinePointRegister<E>
    where
        L::Instruction: FromECInstruction<E>,
    {
        self.sw_full_add_gadget(p, q).result
    }

    /// Like [`AirBuilder::sw_full_add`], with the sum copied into preallocated registers.
    pub fn set_sw_full_add<E: WeierstrassParameters>(
        &mut self,
        p: &AffinePointRegister<E>,
        q: &AffinePointRegister<E>,
        result: &AffinePointRegister<E>,
    ) where
        L::Instruction: FromECInstruction<E>,
    {
        let gadget = self.sw_full_add_gadget(p, q);
        self.set_to_copy(&gadget.result.x, &result.x);
        self.set_to_copy(&gadget.result.y, &result.y);
    }

    pub fn sw_full_add_gadget<E: WeierstrassParameters>(
        &mut self,
        p: &AffinePointRegister<E>,
        q: &AffinePointRegister<E>,
    ) -> SWFullAddGadget<E>
    where
        L::Instruction: FromECInstruction<E>,
    {
        let a = self.fp_constant::<E::BaseField>(&E::a_int());
        let one = self.fp_one::<E::BaseField>();
        let zero = self.fp_zero::<E::BaseField>();

        let p_is_identity = self.fp_is_zero(&p.y);
        let q_is_identity = self.fp_is_zero(&q.y);
        let dx = self.fp_sub(&q.x, &p.x);
        let dy = self.fp_sub(&q.y, &p.y);
        let same_x = self.fp_is_zero(&dx);
        let y_sum = self.fp_add(&p.y, &q.y);
        let opposite_y = self.fp_is_zero(&y_sum);

        let slope = self.alloc::<FieldRegister<E::BaseField>>();
        self.register_instruction(SWSlopeHint {
            p: *p,
            q: *q,
            result: slope,
        });

        // dx * (slope * dx - dy) = 0
        let slope_dx = self.fp_mul(&slope, &dx);
        let chord = self.fp_sub(&slope_dx, &dy);
        let chord = self.fp_mul(&dx, &chord);
        self.fp_assert_zero(&chord);

        // (1 - p_is_identity) * same_x * (1 - opposite_y) * (2 * p.y * slope - 3 * p.x^2 - a) = 0
        let p_finite = self.fp_sub(&one, &p_is_identity);
        let not_opposite = self.fp_sub(&one, &opposite_y);
        let tangent_case = self.fp_mul(&p_finite, &same_x);
        let tangent_case = self.fp_mul(&tangent_case, &not_opposite);
        let two_y = self.fp_add(&p.y, &p.y);
        let tangent_lhs = self.fp_mul(&two_y, &slope);
        let tangent_rhs = self.sw_tangent_numerator::<E>(&p.x, &a);
        let tangent = self.fp_sub(&tangent_lhs, &tangent_rhs);
        let tangent = self.fp_mul(&tangent_case, &tangent);
        self.fp_assert_zero(&tangent);

        let generic = self.sw_add_with_slope(p, q, &slope);
        let opposite = self.fp_mul(&same_x, &opposite_y);

        let x = self.fp_blend(&opposite, &zero, &generic.x);
        let y = self.fp_blend(&opposite, &zero, &generic.y);
        let x = self.fp_blend(&q_is_identity, &p.x, &x);
        let y = self.fp_blend(&q_is_identity, &p.y, &y);
        let x = self.fp_blend(&p_is_identity, &q.x, &x);
        let y = self.fp_blend(&p_is_identity, &q.y, &y);

        self.fp_assert_canonical(&x);
        self.fp_assert_canonical(&y);

        SWFullAddGadget {
            result: AffinePointRegister::new(x, y),
            slope,
            p_is_identity,
            q_is_identity,
            same_x,
            opposite_y,
        }
    }
}

impl<AP: AirParser, E: WeierstrassParameters> AirConstraint<AP> for SWSlopeHint<E> {
    fn eval(&self, _parser: &mut AP) {}
}

impl<F: PrimeField64, E: WeierstrassParameters> Instruction<F> for SWSlopeHint<E> {
    fn write(&self, writer: &mut TraceWriter<F>) -> Result<()> {
        let modulus = E::BaseField::modulus();
        let p = writer.read_ec_point(&self.p)?;
        let q = writer.read_ec_point(&self.q)?;
        let (x_p, y_p) = (p.x % &modulus, p.y % &modulus);
        let (x_q, y_q) = (q.x % &modulus, q.y % &modulus);

        let inverse = |value: &BigUint| value.modpow(&(&modulus - 2u32), &modulus);

        let dx = (&modulus + &x_q - &x_p) % &modulus;
        let slope = if !dx.is_zero() {
            let dy = (&modulus + &y_q - &y_p) % &modulus;
            dy * inverse(&dx) % &modulus
        } else if !y_p.is_zero() && !((&y_p + &y_q) % &modulus).is_zero() {
            let numerator = (&x_p * &x_p * 3u32 + E::a_int()) % &modulus;
            numerator * inverse(&(&y_p * 2u32)) % &modulus
        } else {
            BigUint::zero()
        };
        writer.write(
            &self.result,
            &to_limbs_polynomial::<F, E::BaseField>(&slope),
        )
    }
}

/// Complete addition of two allocated points.
#[derive(Debug, Clone, Copy, Default)]
pub struct SWFullAdd<E>(PhantomData<E>);

impl<L: AirParameters, E: WeierstrassParameters> Component<L> for SWFullAdd<E>
where
    L::Instruction: FromECInstruction<E>,
{
    type Input = (AffinePointRegister<E>, AffinePointRegister<E>);
    type Output = AffinePointRegister<E>;

    fn alloc_input(builder: &mut AirBuilder<L>) -> Self::Input {
        (builder.alloc_ec_point(), builder.alloc_ec_point())
    }

    fn generate(builder: &mut AirBuilder<L>, input: &Self::Input) -> Self::Output {
        builder.sw_full_add(&input.0, &input.1)
    }
}

#[cfg(test)]
mod tests {
    use num::One;

    use super::*;
    use crate::chip::builder::tests::*;
    use crate::chip::constraint::CircuitDescription;
    use crate::chip::ec::instruction::ECInstruction;
    use crate::chip::ec::point::AffinePoint;
    use crate::chip::ec::weierstrass::curve32::{Curve32, Curve32BaseField};
    use crate::chip::ec::weierstrass::secp256k1::Secp256k1;
    use crate::chip::field::limbs::limbs_to_biguint;
    use crate::chip::layout::Layout;
    use crate::chip::register::RegisterSerializable;
    use crate::chip::Chip;
    use crate::utils::log::setup_logger;

    fn edge_cases<E: WeierstrassParameters>() -> Vec<(AffinePoint<E>, AffinePoint<E>)> {
        let base = E::generator();
        let p = base.sw_scalar_mul(&BigUint::from(7u32));
        let q = base.sw_scalar_mul(&BigUint::from(11u32));
        vec![
            (p.clone(), q.clone()),
            (p.clone(), p.clone()),
            (p.clone(), p.sw_neg()),
            (AffinePoint::identity(), q.clone()),
            (p.clone(), AffinePoint::identity()),
            (AffinePoint::identity(), AffinePoint::identity()),
            (base.clone(), base.sw_double()),
        ]
    }

    fn run_full_add<E: WeierstrassParameters + PartialEq>(width: usize) {
        let mut builder = AirBuilder::<TestParameters<ECInstruction<E>>>::new();
        let p = builder.alloc_ec_point();
        let q = builder.alloc_ec_point();
        let sum = builder.sw_full_add(&p, &q);
        let copied = builder.alloc_ec_point();
        builder.set_sw_full_add(&q, &p, &copied);
        let chip = builder.build().unwrap();

        for (p_int, q_int) in edge_cases::<E>() {
            let mut writer = chip.new_writer(width).unwrap();
            writer.write_ec_point(&p, &p_int).unwrap();
            writer.write_ec_point(&q, &q_int).unwrap();
            chip.write_witness(&mut writer).unwrap();
            check_circuit(&chip, &writer);

            let expected = p_int.sw_add(&q_int);
            let sum_value: AffinePoint<E> = writer.read_ec_point(&sum).unwrap();
            let copied_value: AffinePoint<E> = writer.read_ec_point(&copied).unwrap();
            assert_eq!(sum_value, expected);
            assert_eq!(copied_value, expected);
        }
    }

    #[test]
    fn test_sw_full_add_curve32() {
        setup_logger();
        run_full_add::<Curve32>(8);
    }

    #[test]
    fn test_sw_full_add_secp256k1() {
        setup_logger();
        run_full_add::<Secp256k1>(32);
    }

    #[test]
    fn test_sw_full_add_indicators() {
        type E = Curve32;
        type F = GoldilocksField;
        type L = TestParameters<ECInstruction<E>>;

        let mut builder = AirBuilder::<L>::new();
        let p = builder.alloc_ec_point();
        let q = builder.alloc_ec_point();
        let gadget = builder.sw_full_add_gadget(&p, &q);
        let chip = builder.build().unwrap();

        let read = |writer: &TraceWriter<F>, register: &FieldRegister<Curve32BaseField>| {
            limbs_to_biguint(writer.read(register).unwrap().as_slice(), 16)
        };
        let bit = |value: bool| {
            if value {
                BigUint::one()
            } else {
                BigUint::zero()
            }
        };

        for (p_int, q_int) in edge_cases::<E>() {
            let mut writer = chip.new_writer(8).unwrap();
            writer.write_ec_point(&p, &p_int).unwrap();
            writer.write_ec_point(&q, &q_int).unwrap();
            chip.write_witness(&mut writer).unwrap();

            let modulus = Curve32BaseField::modulus();
            assert_eq!(
                read(&writer, &gadget.p_is_identity),
                bit(p_int.is_identity())
            );
            assert_eq!(
                read(&writer, &gadget.q_is_identity),
                bit(q_int.is_identity())
            );
            assert_eq!(read(&writer, &gadget.same_x), bit(p_int.x == q_int.x));
            assert_eq!(
                read(&writer, &gadget.opposite_y),
                bit(((&p_int.y + &q_int.y) % &modulus).is_zero())
            );
        }
    }

    fn tampered_failures<L: AirParameters>(
        chip: &Chip<L>,
        writer: TraceWriter<L::Field>,
        register: &FieldRegister<impl FieldParameters>,
        value: L::Field,
    ) -> usize {
        let width = writer.layout().width();
        let mut table = writer.into_table();
        let layout = Layout::new(width).unwrap();
        table.overwrite(layout.cell(register.register().start()), value);
        let mut circuit = CircuitDescription::new();
        chip.emit_constraints(width, &mut circuit).unwrap();
        circuit.failures(&table).len()
    }

    #[test]
    fn test_sw_full_add_tampered_witness() {
        type E = Curve32;
        type F = GoldilocksField;
        type L = TestParameters<ECInstruction<E>>;

        let mut builder = AirBuilder::<L>::new();
        let p = builder.alloc_ec_point();
        let q = builder.alloc_ec_point();
        let gadget = builder.sw_full_add_gadget(&p, &q);
        let chip = builder.build().unwrap();

        let base = E::generator();
        let cases = [
            (base.sw_scalar_mul(&BigUint::from(3u32)), base.clone()),
            (base.clone(), base.clone()),
            (base.clone(), base.sw_neg()),
        ];
        for (p_int, q_int) in cases {
            let witness = || {
                let mut writer = chip.new_writer(8).unwrap();
                writer.write_ec_point(&p, &p_int).unwrap();
                writer.write_ec_point(&q, &q_int).unwrap();
                chip.write_witness(&mut writer).unwrap();
                writer
            };

            // A wrong slope for a chord or a tangent, and a flipped indicator.
            let slope_failures = tampered_failures(&chip, witness(), &gadget.slope, F::ONE);
            let indicator_failures = if p_int.x == q_int.x {
                let flipped = F::ONE - witness().read(&gadget.opposite_y).unwrap().as_slice()[0];
                tampered_failures(&chip, witness(), &gadget.opposite_y, flipped)
            } else {
                tampered_failures(&chip, witness(), &gadget.same_x, F::ONE)
            };
            if p_int != q_int.sw_neg() {
                assert!(slope_failures > 0);
            }
            assert!(indicator_failures > 0);
        }
    }

    #[test]
    fn test_sw_full_add_rows_amount() {
        type E = Curve32;
        type L = TestParameters<ECInstruction<E>>;

        let mut builder = AirBuilder::<L>::new();
        let input = <SWFullAdd<E> as Component<L>>::alloc_input(&mut builder);
        <SWFullAdd<E> as Component<L>>::generate(&mut builder, &input);
        let chip = builder.build().unwrap();

        let base = E::generator();
        for width in 4..32 {
            let mut writer = chip.new_writer(width).unwrap();
            writer.write_ec_point(&input.0, &base).unwrap();
            writer.write_ec_point(&input.1, &base.sw_double()).unwrap();
            chip.write_witness(&mut writer).unwrap();

            let mut circuit = CircuitDescription::new();
            chip.emit_constraints(width, &mut circuit).unwrap();

            let rows = <SWFullAdd<E> as Component<L>>::rows_amount(width).unwrap();
            assert_eq!(writer.table().num_rows(), rows);
            assert_eq!(circuit.rows_amount(), rows);
            assert_eq!(chip.rows_amount(width).unwrap(), rows);
        }
    }
}
