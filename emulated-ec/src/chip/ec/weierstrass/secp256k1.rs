use num::{BigUint, One, Zero};
use serde::{Deserialize, Serialize};

use super::WeierstrassParameters;
use crate::chip::ec::point::AffinePoint;
use crate::chip::ec::EllipticCurveParameters;
use crate::chip::field::parameters::FieldParameters;

/// The secp256k1 curve, `y^2 = x^3 + 7`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secp256k1;

/// Secp256k1 base field, `p = 2^256 - 2^32 - 977`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secp256k1BaseField;

/// Secp256k1 scalar field, the prime order of the group.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secp256k1ScalarField;

impl FieldParameters for Secp256k1BaseField {
    const NB_BITS_PER_LIMB: usize = 16;
    const NB_LIMBS: usize = 16;
    const NB_WITNESS_LIMBS: usize = 2 * Self::NB_LIMBS - 2;
    const WITNESS_OFFSET: usize = 1usize << 21;

    fn modulus() -> BigUint {
        (BigUint::one() << 256) - (BigUint::one() << 32) - BigUint::from(977u32)
    }
}

impl FieldParameters for Secp256k1ScalarField {
    const NB_BITS_PER_LIMB: usize = 16;
    const NB_LIMBS: usize = 16;
    const NB_WITNESS_LIMBS: usize = 2 * Self::NB_LIMBS - 2;
    const WITNESS_OFFSET: usize = 1usize << 21;

    // 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
    fn modulus() -> BigUint {
        BigUint::from_slice(&[
            0xd0364141, 0xbfd25e8c, 0xaf48a03b, 0xbaaedce6, 0xfffffffe, 0xffffffff, 0xffffffff,
            0xffffffff,
        ])
    }
}

impl EllipticCurveParameters for Secp256k1 {
    type BaseField = Secp256k1BaseField;
    type ScalarField = Secp256k1ScalarField;
}

impl WeierstrassParameters for Secp256k1 {
    fn a_int() -> BigUint {
        BigUint::zero()
    }

    fn b_int() -> BigUint {
        BigUint::from(7u32)
    }

    fn generator() -> AffinePoint<Self> {
        let x = BigUint::from_slice(&[
            0x16f81798, 0x59f2815b, 0x2dce28d9, 0x029bfcdb, 0xce870b07, 0x55a06295, 0xf9dcbbac,
            0x79be667e,
        ]);
        let y = BigUint::from_slice(&[
            0xfb10d4b8, 0x9c47d08f, 0xa6855419, 0xfd17b448, 0x0e1108a8, 0x5da4fbfc, 0x26a3c465,
            0x483ada77,
        ]);
        AffinePoint::new(x, y)
    }
}
