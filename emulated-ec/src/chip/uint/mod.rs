//! Integer gadgets over little-endian limbs of native cells.
//!
//! These carry no modulus: they compare, add and decompose limb sequences as plain integers.

pub mod add;
pub mod bits;
pub mod compare;
