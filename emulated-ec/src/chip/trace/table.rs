use anyhow::{anyhow, ensure, Result};

use crate::chip::layout::Cell;

/// A witness table of fixed width with write-once cells.
///
/// Rows are created on demand. A column index past the width wraps onto the following rows:
/// writing `(column, row)` lands in `(column % width, row + column / width)`.
#[derive(Debug, Clone)]
pub struct WitnessTable<F> {
    width: usize,
    rows: Vec<Vec<Option<F>>>,
}

impl<F: Copy> WitnessTable<F> {
    pub fn new(width: usize) -> Result<Self> {
        ensure!(width > 0, "table width must be positive");
        Ok(Self {
            width,
            rows: Vec::new(),
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    fn position(&self, column: usize, row: usize) -> Cell {
        Cell::new(column % self.width, row + column / self.width)
    }

    pub fn write(&mut self, column: usize, row: usize, value: F) -> Result<()> {
        let cell = self.position(column, row);
        if self.rows.len() <= cell.row {
            let width = self.width;
            self.rows.resize_with(cell.row + 1, || vec![None; width]);
        }
        let slot = &mut self.rows[cell.row][cell.column];
        ensure!(
            slot.is_none(),
            "cell (column {}, row {}) is already assigned",
            cell.column,
            cell.row
        );
        *slot = Some(value);
        Ok(())
    }

    pub fn read(&self, column: usize, row: usize) -> Result<F> {
        let cell = self.position(column, row);
        self.get(cell).ok_or_else(|| {
            anyhow!(
                "cell (column {}, row {}) is not assigned",
                cell.column,
                cell.row
            )
        })
    }

    /// The value at `cell`, if it has been written.
    pub fn get(&self, cell: Cell) -> Option<F> {
        if cell.column >= self.width {
            return None;
        }
        self.rows.get(cell.row).and_then(|row| row[cell.column])
    }

    /// Number of written cells.
    pub fn num_assigned(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|x| x.is_some()).count())
            .sum()
    }

    /// Replaces a written value, bypassing the write-once rule. Used to forge witnesses.
    #[cfg(test)]
    pub(crate) fn overwrite(&mut self, cell: Cell, value: F) {
        self.rows[cell.row][cell.column] = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_once() {
        let mut table = WitnessTable::<u64>::new(3).unwrap();
        table.write(1, 0, 7).unwrap();
        assert_eq!(table.read(1, 0).unwrap(), 7);
        assert!(table.write(1, 0, 7).is_err());
        assert!(table.read(2, 0).is_err());
    }

    #[test]
    fn test_column_wraparound() {
        let mut table = WitnessTable::<u64>::new(3).unwrap();
        table.write(7, 1, 42).unwrap();
        assert_eq!(table.num_rows(), 4);
        assert_eq!(table.get(Cell::new(1, 3)), Some(42));
        assert_eq!(table.read(1, 3).unwrap(), 42);
        assert_eq!(table.read(4, 2).unwrap(), 42);
        assert!(table.write(1, 3, 0).is_err());
        assert_eq!(table.num_assigned(), 1);
    }
}
