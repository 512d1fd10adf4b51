use core::fmt::Debug;

use itertools::Itertools;

use crate::chip::constraint::LookupTable;
use crate::chip::register::memory::CellSlice;
use crate::math::prelude::*;

/// Symbolic arithmetic over the cells of the arena.
///
/// `local_slice` exposes one variable per logical cell index. Everything an instruction asserts
/// goes through `constraint`, `lookup` or `copy_constraint`.
pub trait AirParser: Sized {
    type Field: Field;

    type Var: Debug + Copy + 'static;

    fn local_slice(&self) -> &[Self::Var];

    /// Asserts that `constraint` vanishes.
    fn constraint(&mut self, constraint: Self::Var);

    /// Asserts that the tuple `values` is a row of `table`.
    fn lookup(&mut self, table: LookupTable, values: &[Self::Var]);

    /// Asserts that the cells of `a` and `b` hold equal values, pairwise.
    fn copy_constraint(&mut self, a: &CellSlice, b: &CellSlice) {
        let pairs = a
            .eval_slice(self)
            .iter()
            .copied()
            .zip_eq(b.eval_slice(self).iter().copied())
            .collect::<Vec<_>>();
        for (a, b) in pairs {
            self.assert_eq(a, b);
        }
    }

    fn constant(&mut self, value: Self::Field) -> Self::Var;

    fn add(&mut self, a: Self::Var, b: Self::Var) -> Self::Var;

    fn sub(&mut self, a: Self::Var, b: Self::Var) -> Self::Var;

    fn neg(&mut self, a: Self::Var) -> Self::Var;

    fn mul(&mut self, a: Self::Var, b: Self::Var) -> Self::Var;

    fn zero(&mut self) -> Self::Var {
        self.constant(Self::Field::ZERO)
    }

    fn one(&mut self) -> Self::Var {
        self.constant(Self::Field::ONE)
    }

    fn add_const(&mut self, a: Self::Var, b: Self::Field) -> Self::Var {
        let b = self.constant(b);
        self.add(a, b)
    }

    fn sub_const(&mut self, a: Self::Var, b: Self::Field) -> Self::Var {
        let b = self.constant(b);
        self.sub(a, b)
    }

    fn mul_const(&mut self, a: Self::Var, b: Self::Field) -> Self::Var {
        let b = self.constant(b);
        self.mul(a, b)
    }

    fn assert_eq(&mut self, a: Self::Var, b: Self::Var) {
        let c = self.sub(a, b);
        self.constraint(c);
    }
}
