use core::fmt::Debug;

use anyhow::{ensure, Result};
use num::bigint::RandBigInt;
use num::{BigUint, One};
use rand::rngs::OsRng;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::math::prelude::*;

pub const MAX_NB_BITS_PER_LIMB: usize = 28;

/// Static description of a foreign prime field and of its limb encoding.
pub trait FieldParameters:
    Send + Sync + Copy + 'static + Debug + Serialize + DeserializeOwned + Default
{
    const NB_BITS_PER_LIMB: usize;
    const NB_LIMBS: usize;
    /// Length of the quotient witness of a product identity, `2 * NB_LIMBS - 2`.
    const NB_WITNESS_LIMBS: usize;
    /// Shift making every quotient coefficient non-negative.
    const WITNESS_OFFSET: usize;

    fn modulus() -> BigUint;

    fn nb_bits() -> usize {
        Self::NB_BITS_PER_LIMB * Self::NB_LIMBS
    }

    /// `2^(k * b) - p`.
    fn modulus_complement() -> BigUint {
        (BigUint::one() << Self::nb_bits()) - Self::modulus()
    }

    fn rand() -> BigUint {
        OsRng.gen_biguint_below(&Self::modulus())
    }

    /// Checks that every identity of the field gadgets is exact over the native field `F`.
    fn check_headroom<F: PrimeField64>() -> Result<()> {
        let nb_limbs = Self::NB_LIMBS;
        let nb_bits = Self::NB_BITS_PER_LIMB;
        ensure!(nb_limbs >= 1, "a field element needs at least one limb");
        ensure!(
            (1..=MAX_NB_BITS_PER_LIMB).contains(&nb_bits),
            "limbs of {nb_bits} bits are not supported"
        );
        ensure!(
            Self::modulus().bits() as usize <= Self::nb_bits(),
            "modulus {} does not fit in {nb_limbs} limbs of {nb_bits} bits",
            Self::modulus()
        );
        ensure!(
            Self::NB_WITNESS_LIMBS == 2 * nb_limbs - 2,
            "expected {} witness limbs, got {}",
            2 * nb_limbs - 2,
            Self::NB_WITNESS_LIMBS
        );

        let offset = BigUint::from(Self::WITNESS_OFFSET);
        let max_quotient = BigUint::from(nb_limbs) << nb_bits;
        ensure!(
            offset >= max_quotient,
            "witness offset {offset} is below the quotient bound {max_quotient}"
        );
        ensure!(
            &offset * 2u32 <= BigUint::one() << (2 * nb_bits),
            "witness offset {offset} does not fit in two limbs"
        );

        // Largest coefficient of any emitted identity, including the quotient times `2^b`.
        let max_coefficient = BigUint::from(nb_limbs) << (3 * nb_bits + 2);
        ensure!(
            max_coefficient < F::order(),
            "{nb_limbs} limbs of {nb_bits} bits overflow the native field"
        );
        Ok(())
    }
}
