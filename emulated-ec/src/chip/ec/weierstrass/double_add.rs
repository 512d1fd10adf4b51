use super::WeierstrassParameters;
use crate::chip::builder::AirBuilder;
use crate::chip::ec::point::AffinePointRegister;
use crate::chip::field::instruction::FromFieldInstruction;
use crate::chip::AirParameters;

impl<L: AirParameters> AirBuilder<L> {
    /// Computes `2 * t + q` without materializing the `y` coordinate of `t + q`.
    ///
    /// With `t + q = (x_1, y_1)`, the second slope is
    ///   `(y_1 - t.y) / (x_1 - t.x) = -(lambda_1 + 2 * t.y / (x_1 - t.x))`
    /// and `y_1` cancels out. Requires `t.x != q.x` and `t + q != -t`.
    pub fn sw_double_and_add<E: WeierstrassParameters>(
        &mut self,
        t: &AffinePointRegister<E>,
        q: &AffinePointRegister<E>,
    ) -> AffinePointRegister<E>
    where
        L::Instruction: FromFieldInstruction<E::BaseField>,
    {
        let (x_t, y_t) = (t.x, t.y);
        let x_q = q.x;

        // x_1 = lambda_1^2 - x_t - x_q
        let lambda_1 = self.sw_slope_different(t, q);
        let lambda_1_sq = self.fp_mul(&lambda_1, &lambda_1);
        let mut x_1 = self.fp_sub(&lambda_1_sq, &x_t);
        x_1 = self.fp_sub(&x_1, &x_q);

        // mu = lambda_1 + 2 * y_t / (x_1 - x_t)
        let two_y_t = self.fp_add(&y_t, &y_t);
        let x_1_minus_x_t = self.fp_sub(&x_1, &x_t);
        let ratio = self.fp_div(&two_y_t, &x_1_minus_x_t);
        let mu = self.fp_add(&lambda_1, &ratio);

        // x_r = mu^2 - x_t - x_1, y_r = mu * (x_r - x_t) - y_t
        let mu_sq = self.fp_mul(&mu, &mu);
        let mut x_r = self.fp_sub(&mu_sq, &x_t);
        x_r = self.fp_sub(&x_r, &x_1);

        let x_r_minus_x_t = self.fp_sub(&x_r, &x_t);
        let mut y_r = self.fp_mul(&mu, &x_r_minus_x_t);
        y_r = self.fp_sub(&y_r, &y_t);

        AffinePointRegister::new(x_r, y_r)
    }
}

#[cfg(test)]
mod tests {
    use num::BigUint;

    use super::*;
    use crate::chip::builder::tests::*;
    use crate::chip::ec::gadget::{EllipticCurveGadget, EllipticCurveWriter};
    use crate::chip::ec::point::AffinePoint;
    use crate::chip::ec::weierstrass::curve32::{Curve32, Curve32BaseField};
    use crate::chip::field::instruction::FpInstruction;

    #[test]
    fn test_sw_double_and_add() {
        type E = Curve32;
        type L = TestParameters<FpInstruction<Curve32BaseField>>;

        let mut builder = AirBuilder::<L>::new();
        let t = builder.alloc_ec_point();
        let q = builder.alloc_ec_point();
        let result = builder.sw_double_and_add::<E>(&t, &q);
        let chip = builder.build().unwrap();

        let base = E::generator();
        for (t_scalar, q_scalar) in [(5u32, 3u32), (2, 1), (12345, 678)] {
            let t_int = base.sw_scalar_mul(&BigUint::from(t_scalar));
            let q_int = base.sw_scalar_mul(&BigUint::from(q_scalar));

            let mut writer = chip.new_writer(8).unwrap();
            writer.write_ec_point(&t, &t_int).unwrap();
            writer.write_ec_point(&q, &q_int).unwrap();
            chip.write_witness(&mut writer).unwrap();
            check_circuit(&chip, &writer);

            let value: AffinePoint<E> = writer.read_ec_point(&result).unwrap();
            let expected = base.sw_scalar_mul(&BigUint::from(2 * t_scalar + q_scalar));
            assert_eq!(value, expected);
        }
    }
}
