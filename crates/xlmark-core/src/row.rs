//! Row types

use crate::cell::Cell;
use crate::MAX_COLS;

/// A populated row: its index and its cells ordered by column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// Row index (0-based)
    pub index: u32,
    cells: Vec<Cell>,
}

impl Row {
    /// Create an empty row
    pub fn new(index: u32) -> Self {
        Self {
            index,
            cells: Vec::new(),
        }
    }

    /// Insert a cell, replacing any cell already stored in the same column.
    ///
    /// Cells at or past [`MAX_COLS`] are not stored and `false` is returned,
    /// so every stored column has an exclusive end that fits in a `u16`.
    pub fn insert(&mut self, cell: Cell) -> bool {
        if cell.col >= MAX_COLS {
            return false;
        }
        match self.cells.binary_search_by_key(&cell.col, |c| c.col) {
            Ok(pos) => self.cells[pos] = cell,
            Err(pos) => self.cells.insert(pos, cell),
        }
        true
    }

    /// Get the cell stored at `col`
    pub fn cell(&self, col: u16) -> Option<&Cell> {
        self.cells
            .binary_search_by_key(&col, |c| c.col)
            .ok()
            .map(|pos| &self.cells[pos])
    }

    /// Cells in column order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Column of the first populated cell, `None` for a row without cells
    pub fn first_cell_num(&self) -> Option<u16> {
        self.cells.first().map(|c| c.col)
    }

    /// One past the column of the last populated cell (exclusive end, at
    /// most [`MAX_COLS`])
    pub fn last_cell_num(&self) -> Option<u16> {
        self.cells.last().map(|c| c.col + 1)
    }

    /// Check if the row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of populated cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
