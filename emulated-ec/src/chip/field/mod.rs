//! Arithmetic modulo a foreign prime `p`, using a technique from Polygon Zero.
//! Reference: https://github.com/mir-protocol/plonky2/blob/main/evm/src/arithmetic/addcy.rs
//!
//! We want to compute a + b = result mod p. In the integers, this is equivalent to witnessing some
//! carry such that:
//!
//! a + b - result - carry * p = 0.
//!
//! Encode the integers as polynomials over the native field whose coefficients are the `b`-bit
//! limbs of the integer, lowest first. The above equation becomes
//!
//! a(x) + b(x) - result(x) - carry(x) * p(x)
//!
//! which must vanish at x = 2^b. The prover witnesses the quotient `w(x)` by `x - 2^b`:
//!
//! a(x) + b(x) - result(x) - carry(x) * p(x) - (x - 2^b) * w(x) = 0
//!
//! The coefficients of `w` may be negative, so they are shifted by `WITNESS_OFFSET` and split into
//! low and high `b`-bit halves. Every limb, including both halves, is range checked in
//! `[0, 2^b)`, and `FieldParameters::check_headroom` guarantees that no coefficient of the
//! identity wraps around the native modulus.

pub mod add;
pub mod canonical;
pub mod constants;
pub mod div;
pub mod instruction;
pub mod inverse;
pub mod is_zero;
pub mod limbs;
pub mod mul;
pub mod ops;
pub mod parameters;
pub mod register;
pub mod sub;
mod util;
