use core::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::field::parameters::FieldParameters;

pub mod gadget;
pub mod instruction;
pub mod point;
pub mod weierstrass;

/// A curve over the foreign field `BaseField` whose prime group order is the modulus of
/// `ScalarField`.
pub trait EllipticCurveParameters:
    Send + Sync + Copy + 'static + Debug + Default + Serialize + DeserializeOwned
{
    type BaseField: FieldParameters;

    type ScalarField: FieldParameters;
}
