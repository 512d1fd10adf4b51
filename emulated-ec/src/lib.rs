//! Constraint gadgets for elliptic curve arithmetic over a prime field that is foreign to the
//! native field of the proof system.
//!
//! Foreign field elements are held as little-endian limbs in native cells. Gadgets are recorded
//! by an [`AirBuilder`](chip::builder::AirBuilder) into a single instruction schedule, which is
//! then interpreted twice: once to fill a witness table and once to emit constraints into a
//! [`ConstraintSystem`](chip::constraint::ConstraintSystem).

pub mod air;
pub mod chip;
pub mod math;
pub mod polynomial;
pub mod utils;

pub mod prelude {
    pub use crate::air::parser::AirParser;
    pub use crate::air::AirConstraint;
    pub use crate::chip::builder::AirBuilder;
    pub use crate::chip::constraint::{CircuitDescription, ConstraintSystem};
    pub use crate::chip::ec::gadget::{EllipticCurveGadget, EllipticCurveWriter};
    pub use crate::chip::ec::point::{AffinePoint, AffinePointRegister};
    pub use crate::chip::ec::weierstrass::WeierstrassParameters;
    pub use crate::chip::ec::EllipticCurveParameters;
    pub use crate::chip::field::parameters::FieldParameters;
    pub use crate::chip::field::register::FieldRegister;
    pub use crate::chip::register::{Register, RegisterSerializable};
    pub use crate::chip::trace::writer::TraceWriter;
    pub use crate::chip::{AirParameters, Chip, Component, ComponentManifest};
    pub use crate::math::prelude::*;
}
