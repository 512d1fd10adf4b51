use std::collections::HashMap;
use std::sync::Arc;

use itertools::Itertools;

use super::{ConstraintSystem, Expression, GateId, LookupTable};
use crate::air::parser::AirParser;
use crate::chip::layout::{Cell, Layout};
use crate::chip::register::memory::CellSlice;
use crate::math::prelude::*;

/// Handle to a node of the emitter's expression arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(usize);

#[derive(Debug, Clone, Copy)]
enum Node<F> {
    Cell(Cell),
    Constant(F),
    Add(ExprId, ExprId),
    Sub(ExprId, ExprId),
    Neg(ExprId),
    Mul(ExprId, ExprId),
}

/// The constraint-emitting interpreter of the instruction schedule.
///
/// Instructions are evaluated one at a time. The constraints an instruction asserts are collected
/// into one gate and handed to the sink by [`ConstraintEmitter::flush`], which also resets the
/// arena to the cell leaves.
#[derive(Debug)]
pub struct ConstraintEmitter<F> {
    layout: Layout,
    nodes: Vec<Node<F>>,
    cells: Vec<ExprId>,
    constraints: Vec<ExprId>,
    lookups: Vec<(LookupTable, Vec<ExprId>)>,
    copies: Vec<(Cell, Cell)>,
}

impl<F: Field> ConstraintEmitter<F> {
    pub fn new(layout: Layout, num_cells: usize) -> Self {
        let nodes = (0..num_cells)
            .map(|index| Node::Cell(layout.cell(index)))
            .collect();
        Self {
            layout,
            nodes,
            cells: (0..num_cells).map(ExprId).collect(),
            constraints: Vec::new(),
            lookups: Vec::new(),
            copies: Vec::new(),
        }
    }

    fn push(&mut self, node: Node<F>) -> ExprId {
        self.nodes.push(node);
        ExprId(self.nodes.len() - 1)
    }

    fn expression(
        &self,
        id: ExprId,
        memo: &mut HashMap<ExprId, Arc<Expression<F>>>,
    ) -> Arc<Expression<F>> {
        if let Some(expression) = memo.get(&id) {
            return expression.clone();
        }
        let expression = match self.nodes[id.0] {
            Node::Cell(cell) => Expression::Cell(cell),
            Node::Constant(value) => Expression::Constant(value),
            Node::Add(a, b) => Expression::Sum(self.expression(a, memo), self.expression(b, memo)),
            Node::Sub(a, b) => {
                Expression::Difference(self.expression(a, memo), self.expression(b, memo))
            }
            Node::Neg(a) => Expression::Negation(self.expression(a, memo)),
            Node::Mul(a, b) => {
                Expression::Product(self.expression(a, memo), self.expression(b, memo))
            }
        };
        let expression = Arc::new(expression);
        memo.insert(id, expression.clone());
        expression
    }

    fn owned_expression(
        &self,
        id: ExprId,
        memo: &mut HashMap<ExprId, Arc<Expression<F>>>,
    ) -> Expression<F> {
        Arc::unwrap_or_clone(self.expression(id, memo))
    }

    /// Hands everything asserted since the last flush to `sink`.
    ///
    /// Returns the id of the gate holding the polynomial constraints, if there were any.
    pub fn flush<CS: ConstraintSystem<F>>(&mut self, sink: &mut CS) -> Option<GateId> {
        let mut memo = HashMap::new();

        let constraints = self
            .constraints
            .iter()
            .map(|id| self.owned_expression(*id, &mut memo))
            .collect::<Vec<_>>();
        let gate = (!constraints.is_empty()).then(|| sink.add_gate(constraints));

        for (table, values) in self.lookups.iter() {
            let expressions = values
                .iter()
                .map(|id| self.owned_expression(*id, &mut memo))
                .collect();
            sink.add_lookup_constraint(*table, expressions);
        }
        for (a, b) in self.copies.iter() {
            sink.add_copy_constraint(*a, *b);
        }

        self.constraints.clear();
        self.lookups.clear();
        self.copies.clear();
        self.nodes.truncate(self.cells.len());
        gate
    }
}

impl<F: Field> AirParser for ConstraintEmitter<F> {
    type Field = F;
    type Var = ExprId;

    fn local_slice(&self) -> &[ExprId] {
        &self.cells
    }

    fn constraint(&mut self, constraint: ExprId) {
        self.constraints.push(constraint);
    }

    fn lookup(&mut self, table: LookupTable, values: &[ExprId]) {
        self.lookups.push((table, values.to_vec()));
    }

    fn copy_constraint(&mut self, a: &CellSlice, b: &CellSlice) {
        for (i, j) in a.indices().zip_eq(b.indices()) {
            self.copies.push((self.layout.cell(i), self.layout.cell(j)));
        }
    }

    fn constant(&mut self, value: F) -> ExprId {
        self.push(Node::Constant(value))
    }

    fn add(&mut self, a: ExprId, b: ExprId) -> ExprId {
        self.push(Node::Add(a, b))
    }

    fn sub(&mut self, a: ExprId, b: ExprId) -> ExprId {
        self.push(Node::Sub(a, b))
    }

    fn neg(&mut self, a: ExprId) -> ExprId {
        self.push(Node::Neg(a))
    }

    fn mul(&mut self, a: ExprId, b: ExprId) -> ExprId {
        self.push(Node::Mul(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chip::constraint::{CircuitDescription, ConstraintFailure};
    use crate::chip::trace::table::WitnessTable;

    type F = GoldilocksField;

    #[test]
    fn test_emit_and_check() {
        let layout = Layout::new(2).unwrap();
        let mut emitter = ConstraintEmitter::<F>::new(layout, 3);
        let mut circuit = CircuitDescription::new();

        // cell_2 = cell_0 * cell_1 + 1
        let [a, b, c] = [0, 1, 2].map(|i| emitter.local_slice()[i]);
        let ab = emitter.mul(a, b);
        let rhs = emitter.add_const(ab, F::ONE);
        emitter.assert_eq(c, rhs);
        emitter.lookup(LookupTable::Range(4), &[c]);
        let gate = emitter.flush(&mut circuit);
        assert_eq!(gate, Some(GateId(0)));
        assert_eq!(circuit.num_constraints(), 1);
        assert_eq!(emitter.nodes.len(), 3);

        emitter.copy_constraint(&CellSlice::new(0, 1), &CellSlice::new(1, 1));
        assert_eq!(emitter.flush(&mut circuit), None);
        assert_eq!(circuit.rows_amount(), 2);

        let mut table = WitnessTable::new(2).unwrap();
        for (index, value) in [3u64, 3, 10].into_iter().enumerate() {
            let cell = layout.cell(index);
            table.write(cell.column, cell.row, F::from_canonical_u64(value)).unwrap();
        }
        assert!(circuit.check(&table).is_ok());

        table.overwrite(layout.cell(2), F::from_canonical_u64(17));
        let failures = circuit.failures(&table);
        assert!(failures.contains(&ConstraintFailure::Gate {
            gate: GateId(0),
            constraint: 0
        }));
        assert!(failures
            .iter()
            .any(|failure| matches!(failure, ConstraintFailure::Lookup { .. })));
    }
}
