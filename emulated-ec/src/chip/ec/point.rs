use num::{BigUint, Zero};
use serde::{Deserialize, Serialize};

use super::EllipticCurveParameters;
use crate::chip::field::register::FieldRegister;

/// An affine point with coordinates reduced modulo the base field.
///
/// `(0, 0)` stands for the point at infinity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffinePoint<E: EllipticCurveParameters> {
    pub x: BigUint,
    pub y: BigUint,
    _marker: std::marker::PhantomData<E>,
}

impl<E: EllipticCurveParameters> AffinePoint<E> {
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Self {
            x,
            y,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn identity() -> Self {
        Self::new(BigUint::zero(), BigUint::zero())
    }

    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct AffinePointRegister<E: EllipticCurveParameters> {
    pub x: FieldRegister<E::BaseField>,
    pub y: FieldRegister<E::BaseField>,
}

impl<E: EllipticCurveParameters> AffinePointRegister<E> {
    pub fn new(x: FieldRegister<E::BaseField>, y: FieldRegister<E::BaseField>) -> Self {
        Self { x, y }
    }
}
