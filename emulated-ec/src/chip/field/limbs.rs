//! Conversion between foreign field values and little-endian limb sequences.

use num::{BigUint, One, Zero};

use super::parameters::FieldParameters;
use crate::math::prelude::*;
use crate::polynomial::Polynomial;

/// Splits `value` into `nb_limbs` limbs of `nb_bits` bits, lowest limb first.
///
/// Bits above `nb_limbs * nb_bits` are dropped.
pub fn encode_limbs(value: &BigUint, nb_bits: usize, nb_limbs: usize) -> Vec<u64> {
    let mask = (BigUint::one() << nb_bits) - BigUint::one();
    (0..nb_limbs)
        .map(|i| {
            let limb = (value >> (nb_bits * i)) & &mask;
            limb.iter_u64_digits().next().unwrap_or(0)
        })
        .collect()
}

/// `sum_i limbs[i] * 2^(nb_bits * i)`, without any reduction or range check.
pub fn decode_limbs(limbs: &[u64], nb_bits: usize) -> BigUint {
    limbs
        .iter()
        .rev()
        .fold(BigUint::zero(), |acc, limb| (acc << nb_bits) + *limb)
}

/// Decodes limbs held in native field elements.
pub fn limbs_to_biguint<F: PrimeField64>(limbs: &[F], nb_bits: usize) -> BigUint {
    let limbs = limbs
        .iter()
        .map(|x| x.to_canonical_u64())
        .collect::<Vec<_>>();
    decode_limbs(&limbs, nb_bits)
}

/// The limbs of `value` in the encoding of `P`, as a polynomial over `F`.
pub fn to_limbs_polynomial<F: Field, P: FieldParameters>(value: &BigUint) -> Polynomial<F> {
    encode_limbs(value, P::NB_BITS_PER_LIMB, P::NB_LIMBS)
        .into_iter()
        .map(F::from_canonical_u64)
        .collect()
}

#[cfg(test)]
mod tests {
    use num::bigint::RandBigInt;
    use rand::thread_rng;

    use super::*;
    use crate::chip::ec::weierstrass::secp256k1::Secp256k1BaseField;

    #[test]
    fn test_limbs_round_trip() {
        let mut rng = thread_rng();
        for (nb_bits, nb_limbs) in [(1, 40), (8, 4), (13, 5), (16, 16), (28, 10)] {
            let modulus = BigUint::one() << (nb_bits * nb_limbs);
            for _ in 0..20 {
                let value = rng.gen_biguint_below(&modulus);
                let limbs = encode_limbs(&value, nb_bits, nb_limbs);
                assert_eq!(limbs.len(), nb_limbs);
                assert!(limbs.iter().all(|limb| *limb < 1 << nb_bits));
                assert_eq!(decode_limbs(&limbs, nb_bits), value);
            }
        }
    }

    #[test]
    fn test_limbs_truncate_and_overflow() {
        let value = BigUint::from(0x1_2345u64);
        assert_eq!(encode_limbs(&value, 8, 2), vec![0x45, 0x23]);

        // An out-of-range limb decodes to a value past the encoding width.
        let decoded = decode_limbs(&[1 << 16, 0], 16);
        assert_eq!(decoded, BigUint::from(1u64 << 16));
        assert_eq!(encode_limbs(&decoded, 16, 2), vec![0, 1]);
    }

    #[test]
    fn test_limbs_polynomial() {
        type F = GoldilocksField;
        type P = Secp256k1BaseField;

        let value = P::rand();
        let poly = to_limbs_polynomial::<F, P>(&value);
        assert_eq!(poly.len(), P::NB_LIMBS);
        assert_eq!(limbs_to_biguint(poly.as_slice(), P::NB_BITS_PER_LIMB), value);
    }
}
