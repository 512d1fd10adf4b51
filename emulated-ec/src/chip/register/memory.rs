use core::ops::Range;

use serde::{Deserialize, Serialize};

use crate::air::parser::AirParser;

/// A contiguous run of cells, addressed by logical index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellSlice {
    start: usize,
    len: usize,
}

impl CellSlice {
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// The single cell at offset `i`.
    pub fn get(&self, i: usize) -> Self {
        assert!(i < self.len, "index {i} out of bounds for slice of length {}", self.len);
        Self::new(self.start + i, 1)
    }

    pub fn get_range(&self, range: Range<usize>) -> Self {
        assert!(range.start <= range.end && range.end <= self.len);
        Self::new(self.start + range.start, range.end - range.start)
    }

    pub fn eval_slice<'a, AP: AirParser>(&self, parser: &'a AP) -> &'a [AP::Var] {
        &parser.local_slice()[self.indices()]
    }
}
