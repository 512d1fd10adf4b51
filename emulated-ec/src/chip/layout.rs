use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// A position in the witness table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub column: usize,
    pub row: usize,
}

impl Cell {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

/// Maps logical cell indices to table positions for a fixed width.
///
/// This is the only place where a logical index becomes a (column, row) pair. The witness pass
/// and the constraint pass both go through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    width: usize,
}

impl Layout {
    pub fn new(width: usize) -> Result<Self> {
        ensure!(width > 0, "table width must be positive");
        Ok(Self { width })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub const fn cell(&self, index: usize) -> Cell {
        Cell {
            column: index % self.width,
            row: index / self.width,
        }
    }

    /// Rows needed to hold `num_cells` consecutive cells starting at index 0.
    pub fn rows_amount(&self, num_cells: usize) -> usize {
        num_cells.div_ceil(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_wraps_rows() {
        let layout = Layout::new(4).unwrap();
        assert_eq!(layout.cell(0), Cell::new(0, 0));
        assert_eq!(layout.cell(3), Cell::new(3, 0));
        assert_eq!(layout.cell(4), Cell::new(0, 1));
        assert_eq!(layout.cell(10), Cell::new(2, 2));
        assert_eq!(layout.rows_amount(0), 0);
        assert_eq!(layout.rows_amount(8), 2);
        assert_eq!(layout.rows_amount(9), 3);
        assert!(Layout::new(0).is_err());
    }
}
