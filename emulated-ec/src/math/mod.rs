//! The native field the circuit cells live in.

pub mod prelude {
    pub use plonky2::field::goldilocks_field::GoldilocksField;
    pub use plonky2::field::types::{Field, Field64, PrimeField64, Sample};
}
