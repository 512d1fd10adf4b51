use anyhow::{ensure, Result};

use super::limbs::encode_limbs;
use super::parameters::FieldParameters;
use crate::math::prelude::*;
use crate::polynomial::parser::PolynomialParser;
use crate::polynomial::Polynomial;

/// Constrains `p_vanishing(x) = (x - 2^b) * w(x)` where `w` is given by its shifted low and high
/// limb halves.
pub fn eval_field_operation<AP: PolynomialParser, P: FieldParameters>(
    parser: &mut AP,
    p_vanishing: &Polynomial<AP::Var>,
    p_witness_low: &Polynomial<AP::Var>,
    p_witness_high: &Polynomial<AP::Var>,
) {
    // Reconstruct and shift back the witness polynomial
    let limb_field = AP::Field::from_canonical_u64(1 << P::NB_BITS_PER_LIMB);
    let limb = parser.constant(limb_field);

    let p_witness_high_mul_limb = parser.poly_scalar_mul(p_witness_high, &limb);
    let p_witness_shifted = parser.poly_add(p_witness_low, &p_witness_high_mul_limb);

    let offset = AP::Field::from_canonical_u64(P::WITNESS_OFFSET as u64);
    let offset = parser.constant(offset);
    let p_witness = parser.poly_scalar_sub(&p_witness_shifted, &offset);

    // Multiply by (x - 2^b) and make the constraint
    let root_monomial = Polynomial::from_coefficients(vec![-limb_field, AP::Field::ONE]);
    let p_witness_mul_root = parser.poly_mul_poly_const(&p_witness, &root_monomial);

    let constraints = parser.poly_sub(p_vanishing, &p_witness_mul_root);
    for constr in constraints.coefficients {
        parser.constraint(constr);
    }
}

pub fn modulus_field_iter<F: Field, P: FieldParameters>() -> impl Iterator<Item = F> {
    encode_limbs(&P::modulus(), P::NB_BITS_PER_LIMB, P::NB_LIMBS)
        .into_iter()
        .map(F::from_canonical_u64)
}

/// Divides `p_vanishing` by `x - 2^b` and shifts the quotient by `P::WITNESS_OFFSET`.
///
/// Fails if `2^b` is not a root, or if a shifted coefficient does not fit in two limbs. Both
/// happen only when an operand is outside of its range.
pub fn compute_root_quotient_and_shift<F: PrimeField64, P: FieldParameters>(
    p_vanishing: &Polynomial<F>,
) -> Result<Vec<F>> {
    let root = F::from_canonical_u64(1 << P::NB_BITS_PER_LIMB);
    ensure!(
        p_vanishing.eval(root) == F::ZERO,
        "the field identity does not vanish at 2^{}",
        P::NB_BITS_PER_LIMB
    );
    let p_quotient = p_vanishing.root_quotient(root);

    let offset = F::from_canonical_u64(P::WITNESS_OFFSET as u64);
    let bound = 1u64 << (2 * P::NB_BITS_PER_LIMB);
    p_quotient
        .coefficients
        .into_iter()
        .map(|x| {
            let shifted = x + offset;
            ensure!(
                shifted.to_canonical_u64() < bound,
                "quotient coefficient out of range"
            );
            Ok(shifted)
        })
        .collect()
}

/// Splits shifted quotient coefficients into their low and high `b`-bit halves.
pub fn split_witness_limbs<F: PrimeField64, P: FieldParameters>(
    p_witness: &[F],
) -> (Vec<F>, Vec<F>) {
    let mask = (1u64 << P::NB_BITS_PER_LIMB) - 1;
    p_witness
        .iter()
        .map(|x| {
            let value = x.to_canonical_u64();
            (
                F::from_canonical_u64(value & mask),
                F::from_canonical_u64(value >> P::NB_BITS_PER_LIMB),
            )
        })
        .unzip()
}
