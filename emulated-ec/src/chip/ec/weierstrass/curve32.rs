//! A prime order curve over a 32-bit field, small enough for exhaustive edge case tests.

use num::{BigUint, Zero};
use serde::{Deserialize, Serialize};

use super::WeierstrassParameters;
use crate::chip::ec::point::AffinePoint;
use crate::chip::ec::EllipticCurveParameters;
use crate::chip::field::parameters::FieldParameters;

/// `y^2 = x^3 + 13` over `p = 2^32 - 315`, with prime order `n = 4294939651`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curve32;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curve32BaseField;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curve32ScalarField;

impl FieldParameters for Curve32BaseField {
    const NB_BITS_PER_LIMB: usize = 16;
    const NB_LIMBS: usize = 2;
    const NB_WITNESS_LIMBS: usize = 2 * Self::NB_LIMBS - 2;
    const WITNESS_OFFSET: usize = 1usize << 17;

    fn modulus() -> BigUint {
        BigUint::from(4294966981u64)
    }
}

impl FieldParameters for Curve32ScalarField {
    const NB_BITS_PER_LIMB: usize = 16;
    const NB_LIMBS: usize = 2;
    const NB_WITNESS_LIMBS: usize = 2 * Self::NB_LIMBS - 2;
    const WITNESS_OFFSET: usize = 1usize << 17;

    fn modulus() -> BigUint {
        BigUint::from(4294939651u64)
    }
}

impl EllipticCurveParameters for Curve32 {
    type BaseField = Curve32BaseField;
    type ScalarField = Curve32ScalarField;
}

impl WeierstrassParameters for Curve32 {
    fn a_int() -> BigUint {
        BigUint::zero()
    }

    fn b_int() -> BigUint {
        BigUint::from(13u32)
    }

    fn generator() -> AffinePoint<Self> {
        AffinePoint::new(BigUint::from(2u32), BigUint::from(213086585u32))
    }
}
