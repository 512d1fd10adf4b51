use num::BigUint;

use super::point::AffinePoint;
use super::EllipticCurveParameters;
use crate::chip::field::parameters::FieldParameters;

pub mod biguint_operations;
pub mod curve32;
pub mod double_add;
pub mod full_add;
pub mod group;
pub mod scalar_mul;
pub mod secp256k1;
pub mod slope;

/// Parameters that specify a short Weierstrass curve : y^2 = x^3 + ax + b.
///
/// The curve must have prime order and `b != 0`, so that no point has `y = 0` and `(0, 0)` is
/// free to represent the point at infinity.
pub trait WeierstrassParameters: EllipticCurveParameters {
    fn a_int() -> BigUint;

    fn b_int() -> BigUint;

    fn generator() -> AffinePoint<Self>;

    fn prime_group_order() -> BigUint {
        Self::ScalarField::modulus()
    }
}
