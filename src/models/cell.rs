//! Grid Cell Model
//!
//! Zero-based `(row, col)` addresses inside an implicit `rows x cols`
//! rectangle, and the set of blocked cells sampled from it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A single grid address, ordered by row then column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Whether the cell lies inside a `rows x cols` grid
    pub fn within(&self, rows: u32, cols: u32) -> bool {
        self.row < rows && self.col < cols
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Dimensions recorded in a blocked cells file header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedCellsHeader {
    pub rows: u32,
    pub cols: u32,
}

impl BlockedCellsHeader {
    pub fn matches(&self, rows: u32, cols: u32) -> bool {
        self.rows == rows && self.cols == cols
    }
}

/// Unique blocked cells of one grid
///
/// Insertion ignores duplicates and cells outside the grid, so the set
/// can never violate its bounds.
#[derive(Debug, Clone)]
pub struct BlockedCellSet {
    rows: u32,
    cols: u32,
    cells: HashSet<Cell>,
}

impl BlockedCellSet {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            cells: HashSet::new(),
        }
    }

    /// Pre-size for an expected number of cells
    pub fn with_capacity(rows: u32, cols: u32, capacity: usize) -> Self {
        Self {
            rows,
            cols,
            cells: HashSet::with_capacity(capacity),
        }
    }

    /// Insert a cell, returning true if it was new and in bounds
    pub fn insert(&mut self, cell: Cell) -> bool {
        if !cell.within(self.rows, self.cols) {
            return false;
        }
        self.cells.insert(cell)
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Cells in ascending `(row, col)` order
    pub fn sorted(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.cells.iter().copied().collect();
        cells.sort_unstable();
        cells
    }
}
