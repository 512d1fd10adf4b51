use num::{BigUint, Zero};

use super::WeierstrassParameters;
use crate::chip::ec::point::AffinePoint;
use crate::chip::field::parameters::FieldParameters;

impl<E: WeierstrassParameters> AffinePoint<E> {
    pub fn sw_neg(&self) -> Self {
        let p = E::BaseField::modulus();
        AffinePoint::new(self.x.clone(), (&p - &self.y) % &p)
    }

    pub fn is_on_curve(&self) -> bool {
        if self.is_identity() {
            return true;
        }
        let p = E::BaseField::modulus();
        let lhs = &self.y * &self.y % &p;
        let rhs = (&self.x * &self.x * &self.x + E::a_int() * &self.x + E::b_int()) % &p;
        lhs == rhs
    }

    /// Complete addition on the curve, with `(0, 0)` as the identity.
    pub fn sw_add(&self, other: &AffinePoint<E>) -> AffinePoint<E> {
        if self.is_identity() {
            return other.clone();
        }
        if other.is_identity() {
            return self.clone();
        }
        let p = E::BaseField::modulus();
        if self.x == other.x {
            if ((&self.y + &other.y) % &p).is_zero() {
                return AffinePoint::identity();
            }
            return self.sw_double();
        }
        let slope_numerator = (&p + &other.y - &self.y) % &p;
        let slope_denominator = (&p + &other.x - &self.x) % &p;
        let slope_denom_inverse = slope_denominator.modpow(&(&p - 2u32), &p);
        let slope = (slope_numerator * &slope_denom_inverse) % &p;

        let x_3n = (&slope * &slope + &p + &p - &self.x - &other.x) % &p;
        let y_3n = (&slope * &(&p + &self.x - &x_3n) + &p - &self.y) % &p;

        AffinePoint::new(x_3n, y_3n)
    }

    pub fn sw_double(&self) -> AffinePoint<E> {
        if self.y.is_zero() {
            return AffinePoint::identity();
        }
        let p = E::BaseField::modulus();
        let a = E::a_int();
        let slope_numerator = (&a + &(&self.x * &self.x) * 3u32) % &p;

        let slope_denominator = (&self.y * 2u32) % &p;
        let slope_denom_inverse = slope_denominator.modpow(&(&p - 2u32), &p);
        let slope = (slope_numerator * &slope_denom_inverse) % &p;

        let x_3n = (&slope * &slope + &p + &p - &self.x - &self.x) % &p;

        let y_3n = (&slope * &(&p + &self.x - &x_3n) + &p - &self.y) % &p;

        AffinePoint::new(x_3n, y_3n)
    }

    pub fn sw_scalar_mul(&self, scalar: &BigUint) -> Self {
        let mut result = AffinePoint::identity();
        let mut temp = self.clone();
        for i in 0..scalar.bits() {
            if scalar.bit(i) {
                result = result.sw_add(&temp);
            }
            temp = temp.sw_double();
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use num::bigint::RandBigInt;
    use rand::thread_rng;

    use super::*;
    use crate::chip::ec::weierstrass::curve32::Curve32;
    use crate::chip::ec::weierstrass::secp256k1::Secp256k1;

    #[test]
    fn test_weierstrass_biguint_scalar_mul() {
        type E = Secp256k1;
        let base = E::generator();
        assert!(base.is_on_curve());

        let mut rng = thread_rng();
        for _ in 0..10 {
            let x = rng.gen_biguint(24);
            let y = rng.gen_biguint(25);

            let x_base = base.sw_scalar_mul(&x);
            let y_x_base = x_base.sw_scalar_mul(&y);
            let xy = &x * &y;
            let xy_base = base.sw_scalar_mul(&xy);
            assert_eq!(y_x_base, xy_base);
            assert!(xy_base.is_on_curve());
        }
    }

    #[test]
    fn test_weierstrass_biguint_group_laws() {
        type E = Curve32;
        let base = E::generator();
        let n = E::prime_group_order();

        assert!(base.sw_scalar_mul(&n).is_identity());
        assert_eq!(base.sw_scalar_mul(&(&n - 1u32)), base.sw_neg());
        assert!(base.sw_add(&base.sw_neg()).is_identity());
        assert_eq!(base.sw_add(&base), base.sw_double());
        assert_eq!(base.sw_add(&AffinePoint::identity()), base);
        assert_eq!(AffinePoint::identity().sw_add(&base), base);
    }
}
