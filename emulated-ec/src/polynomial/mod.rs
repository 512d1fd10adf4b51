pub mod parser;

use core::ops::{Add, Mul, Neg, Sub};

use itertools::{EitherOrBoth, Itertools};

use crate::math::prelude::*;

/// A wrapper around a vector of coefficients, lowest degree first.
///
/// Limb sequences are read as polynomials evaluated at `x = 2^b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial<T> {
    pub coefficients: Vec<T>,
}

impl<T> Polynomial<T> {
    pub fn from_coefficients(coefficients: Vec<T>) -> Self {
        Self { coefficients }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.coefficients
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }
}

impl<T: Clone> Polynomial<T> {
    pub fn from_slice(coefficients: &[T]) -> Self {
        Self {
            coefficients: coefficients.to_vec(),
        }
    }
}

impl<T> FromIterator<T> for Polynomial<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            coefficients: iter.into_iter().collect(),
        }
    }
}

impl<F: Field> Polynomial<F> {
    /// Evaluates the polynomial at `x` with Horner's rule.
    pub fn eval(&self, x: F) -> F {
        self.coefficients
            .iter()
            .rev()
            .fold(F::ZERO, |acc, c| acc * x + *c)
    }

    /// Divides by `(x - root)` and returns the quotient, dropping the remainder.
    ///
    /// The remainder is `self.eval(root)`, so the division is exact whenever `root` is a root.
    pub fn root_quotient(&self, root: F) -> Self {
        let degree = self.coefficients.len().saturating_sub(1);
        let mut quotient = vec![F::ZERO; degree];
        let mut acc = F::ZERO;
        for i in (1..self.coefficients.len()).rev() {
            acc = self.coefficients[i] + acc * root;
            quotient[i - 1] = acc;
        }
        Self::from_coefficients(quotient)
    }
}

impl<F: Field> Add for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn add(self, other: Self) -> Polynomial<F> {
        self.coefficients
            .iter()
            .zip_longest(other.coefficients.iter())
            .map(|x| match x {
                EitherOrBoth::Both(a, b) => *a + *b,
                EitherOrBoth::Left(a) => *a,
                EitherOrBoth::Right(b) => *b,
            })
            .collect()
    }
}

impl<F: Field> Sub for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn sub(self, other: Self) -> Polynomial<F> {
        self.coefficients
            .iter()
            .zip_longest(other.coefficients.iter())
            .map(|x| match x {
                EitherOrBoth::Both(a, b) => *a - *b,
                EitherOrBoth::Left(a) => *a,
                EitherOrBoth::Right(b) => -*b,
            })
            .collect()
    }
}

impl<F: Field> Neg for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn neg(self) -> Polynomial<F> {
        self.coefficients.iter().map(|x| -*x).collect()
    }
}

impl<F: Field> Mul for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn mul(self, other: Self) -> Polynomial<F> {
        if self.is_empty() || other.is_empty() {
            return Polynomial::from_coefficients(Vec::new());
        }
        let mut result = vec![F::ZERO; self.len() + other.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in other.coefficients.iter().enumerate() {
                result[i + j] += *a * *b;
            }
        }
        Polynomial::from_coefficients(result)
    }
}

impl<F: Field> Add<Polynomial<F>> for Polynomial<F> {
    type Output = Polynomial<F>;

    fn add(self, other: Polynomial<F>) -> Polynomial<F> {
        &self + &other
    }
}

impl<F: Field> Add<&Polynomial<F>> for Polynomial<F> {
    type Output = Polynomial<F>;

    fn add(self, other: &Polynomial<F>) -> Polynomial<F> {
        &self + other
    }
}

impl<F: Field> Sub<Polynomial<F>> for Polynomial<F> {
    type Output = Polynomial<F>;

    fn sub(self, other: Polynomial<F>) -> Polynomial<F> {
        &self - &other
    }
}

impl<F: Field> Sub<&Polynomial<F>> for Polynomial<F> {
    type Output = Polynomial<F>;

    fn sub(self, other: &Polynomial<F>) -> Polynomial<F> {
        &self - other
    }
}
