use itertools::{EitherOrBoth, Itertools};

use super::Polynomial;
use crate::air::parser::AirParser;

/// Polynomial arithmetic on top of an [`AirParser`], coefficient by coefficient.
pub trait PolynomialParser: AirParser {
    fn constant_poly(&mut self, polynomial: &Polynomial<Self::Field>) -> Polynomial<Self::Var> {
        polynomial
            .coefficients
            .iter()
            .map(|x| self.constant(*x))
            .collect()
    }

    fn poly_add(
        &mut self,
        a: &Polynomial<Self::Var>,
        b: &Polynomial<Self::Var>,
    ) -> Polynomial<Self::Var> {
        a.coefficients
            .iter()
            .zip_longest(b.coefficients.iter())
            .map(|x| match x {
                EitherOrBoth::Both(a, b) => self.add(*a, *b),
                EitherOrBoth::Left(a) => *a,
                EitherOrBoth::Right(b) => *b,
            })
            .collect()
    }

    fn poly_sub(
        &mut self,
        a: &Polynomial<Self::Var>,
        b: &Polynomial<Self::Var>,
    ) -> Polynomial<Self::Var> {
        a.coefficients
            .iter()
            .zip_longest(b.coefficients.iter())
            .map(|x| match x {
                EitherOrBoth::Both(a, b) => self.sub(*a, *b),
                EitherOrBoth::Left(a) => *a,
                EitherOrBoth::Right(b) => self.neg(*b),
            })
            .collect()
    }

    fn poly_scalar_sub(
        &mut self,
        a: &Polynomial<Self::Var>,
        b: &Self::Var,
    ) -> Polynomial<Self::Var> {
        a.coefficients.iter().map(|x| self.sub(*x, *b)).collect()
    }

    fn poly_scalar_mul(
        &mut self,
        a: &Polynomial<Self::Var>,
        b: &Self::Var,
    ) -> Polynomial<Self::Var> {
        a.coefficients.iter().map(|x| self.mul(*x, *b)).collect()
    }

    fn poly_mul(
        &mut self,
        a: &Polynomial<Self::Var>,
        b: &Polynomial<Self::Var>,
    ) -> Polynomial<Self::Var> {
        if a.is_empty() || b.is_empty() {
            return Polynomial::from_coefficients(Vec::new());
        }
        let mut result: Vec<Option<Self::Var>> = vec![None; a.len() + b.len() - 1];
        for (i, a) in a.coefficients.iter().enumerate() {
            for (j, b) in b.coefficients.iter().enumerate() {
                let ab = self.mul(*a, *b);
                result[i + j] = Some(match result[i + j] {
                    Some(acc) => self.add(acc, ab),
                    None => ab,
                });
            }
        }
        result.into_iter().flatten().collect()
    }

    fn poly_mul_poly_const(
        &mut self,
        a: &Polynomial<Self::Var>,
        b: &Polynomial<Self::Field>,
    ) -> Polynomial<Self::Var> {
        if a.is_empty() || b.is_empty() {
            return Polynomial::from_coefficients(Vec::new());
        }
        let mut result: Vec<Option<Self::Var>> = vec![None; a.len() + b.len() - 1];
        for (i, a) in a.coefficients.iter().enumerate() {
            for (j, b) in b.coefficients.iter().enumerate() {
                let ab = self.mul_const(*a, *b);
                result[i + j] = Some(match result[i + j] {
                    Some(acc) => self.add(acc, ab),
                    None => ab,
                });
            }
        }
        result.into_iter().flatten().collect()
    }
}

impl<AP: AirParser> PolynomialParser for AP {}
