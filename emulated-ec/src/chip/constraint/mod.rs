//! The constraint pass and the sink it writes into.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use super::layout::Cell;
use super::trace::table::WitnessTable;
use crate::math::prelude::*;

pub mod emitter;

pub use emitter::ConstraintEmitter;

/// Lookup tables referenced by lookup constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookupTable {
    /// All integers in `[0, 2^bits)`.
    Range(usize),
}

impl LookupTable {
    pub fn contains(&self, values: &[u64]) -> bool {
        match self {
            LookupTable::Range(bits) => match values {
                [value] => *bits >= 64 || *value < (1u64 << bits),
                _ => false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GateId(pub usize);

/// A polynomial expression over table cells.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression<F> {
    Constant(F),
    Cell(Cell),
    Sum(Arc<Expression<F>>, Arc<Expression<F>>),
    Difference(Arc<Expression<F>>, Arc<Expression<F>>),
    Negation(Arc<Expression<F>>),
    Product(Arc<Expression<F>>, Arc<Expression<F>>),
}

impl<F: Field> Expression<F> {
    /// Evaluates the expression on a witness table, or returns the first unassigned cell.
    pub fn evaluate(&self, table: &WitnessTable<F>) -> Result<F, Cell> {
        match self {
            Expression::Constant(value) => Ok(*value),
            Expression::Cell(cell) => table.get(*cell).ok_or(*cell),
            Expression::Sum(a, b) => Ok(a.evaluate(table)? + b.evaluate(table)?),
            Expression::Difference(a, b) => Ok(a.evaluate(table)? - b.evaluate(table)?),
            Expression::Negation(a) => Ok(-a.evaluate(table)?),
            Expression::Product(a, b) => Ok(a.evaluate(table)? * b.evaluate(table)?),
        }
    }

    /// The largest row referenced by the expression.
    pub fn max_row(&self) -> Option<usize> {
        match self {
            Expression::Constant(_) => None,
            Expression::Cell(cell) => Some(cell.row),
            Expression::Negation(a) => a.max_row(),
            Expression::Sum(a, b) | Expression::Difference(a, b) | Expression::Product(a, b) => {
                a.max_row().max(b.max_row())
            }
        }
    }
}

/// A sink for emitted constraints.
pub trait ConstraintSystem<F> {
    /// Adds a gate: every expression must evaluate to zero.
    fn add_gate(&mut self, constraints: Vec<Expression<F>>) -> GateId;

    fn add_copy_constraint(&mut self, a: Cell, b: Cell);

    /// Adds a lookup: the tuple of `expressions` must be a row of `table`.
    fn add_lookup_constraint(&mut self, table: LookupTable, expressions: Vec<Expression<F>>);
}

/// A way in which a witness table violates a [`CircuitDescription`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintFailure {
    Gate { gate: GateId, constraint: usize },
    Lookup { table: LookupTable, lookup: usize },
    Copy { a: Cell, b: Cell },
    Unassigned(Cell),
}

/// An in-memory constraint system that can check a filled witness table.
#[derive(Debug, Clone, Default)]
pub struct CircuitDescription<F> {
    gates: Vec<Vec<Expression<F>>>,
    copies: Vec<(Cell, Cell)>,
    lookups: Vec<(LookupTable, Vec<Expression<F>>)>,
}

impl<F> CircuitDescription<F> {
    pub fn new() -> Self {
        Self {
            gates: Vec::new(),
            copies: Vec::new(),
            lookups: Vec::new(),
        }
    }

    pub fn gates(&self) -> &[Vec<Expression<F>>] {
        &self.gates
    }

    pub fn copies(&self) -> &[(Cell, Cell)] {
        &self.copies
    }

    pub fn lookups(&self) -> &[(LookupTable, Vec<Expression<F>>)] {
        &self.lookups
    }

    pub fn num_constraints(&self) -> usize {
        self.gates.iter().map(Vec::len).sum()
    }
}

impl<F> ConstraintSystem<F> for CircuitDescription<F> {
    fn add_gate(&mut self, constraints: Vec<Expression<F>>) -> GateId {
        self.gates.push(constraints);
        GateId(self.gates.len() - 1)
    }

    fn add_copy_constraint(&mut self, a: Cell, b: Cell) {
        self.copies.push((a, b));
    }

    fn add_lookup_constraint(&mut self, table: LookupTable, expressions: Vec<Expression<F>>) {
        self.lookups.push((table, expressions));
    }
}

impl<F: PrimeField64> CircuitDescription<F> {
    /// Rows referenced by any gate, copy or lookup.
    pub fn rows_amount(&self) -> usize {
        let gate_rows = self.gates.iter().flatten().filter_map(Expression::max_row);
        let lookup_rows = self
            .lookups
            .iter()
            .flat_map(|(_, expressions)| expressions.iter())
            .filter_map(Expression::max_row);
        let copy_rows = self.copies.iter().map(|(a, b)| a.row.max(b.row));
        gate_rows
            .chain(lookup_rows)
            .chain(copy_rows)
            .max()
            .map_or(0, |row| row + 1)
    }

    /// Every violated constraint of `table`.
    pub fn failures(&self, table: &WitnessTable<F>) -> Vec<ConstraintFailure> {
        let mut failures = Vec::new();
        for (i, gate) in self.gates.iter().enumerate() {
            for (j, constraint) in gate.iter().enumerate() {
                match constraint.evaluate(table) {
                    Ok(value) if value == F::ZERO => {}
                    Ok(_) => failures.push(ConstraintFailure::Gate {
                        gate: GateId(i),
                        constraint: j,
                    }),
                    Err(cell) => failures.push(ConstraintFailure::Unassigned(cell)),
                }
            }
        }
        for (i, (lookup_table, expressions)) in self.lookups.iter().enumerate() {
            let values = expressions
                .iter()
                .map(|expression| expression.evaluate(table))
                .collect::<Result<Vec<_>, _>>();
            match values {
                Ok(values) => {
                    let values = values
                        .iter()
                        .map(|x| x.to_canonical_u64())
                        .collect::<Vec<_>>();
                    if !lookup_table.contains(&values) {
                        failures.push(ConstraintFailure::Lookup {
                            table: *lookup_table,
                            lookup: i,
                        });
                    }
                }
                Err(cell) => failures.push(ConstraintFailure::Unassigned(cell)),
            }
        }
        for (a, b) in self.copies.iter() {
            match (table.get(*a), table.get(*b)) {
                (Some(x), Some(y)) if x == y => {}
                (Some(_), Some(_)) => failures.push(ConstraintFailure::Copy { a: *a, b: *b }),
                (None, _) => failures.push(ConstraintFailure::Unassigned(*a)),
                (_, None) => failures.push(ConstraintFailure::Unassigned(*b)),
            }
        }
        failures
    }

    /// Checks `table` against every constraint, reporting the first failure.
    pub fn check(&self, table: &WitnessTable<F>) -> Result<()> {
        match self.failures(table).first() {
            None => Ok(()),
            Some(failure) => Err(anyhow!("witness does not satisfy the circuit: {failure:?}")),
        }
    }
}
