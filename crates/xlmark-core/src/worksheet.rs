//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{Cell, CellRange};
use crate::error::{Error, Result};
use crate::row::Row;
use crate::{MAX_COLS, MAX_ROWS};

/// Active pane code for the lower-right pane
pub const PANE_LOWER_RIGHT: u8 = 0;
/// Active pane code for the upper-right pane
pub const PANE_UPPER_RIGHT: u8 = 1;
/// Active pane code for the lower-left pane
pub const PANE_LOWER_LEFT: u8 = 2;
/// Active pane code for the upper-left pane
pub const PANE_UPPER_LEFT: u8 = 3;

/// Window split / freeze information of a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaneInfo {
    /// First row of the bottom pane (0 when there is no horizontal split)
    pub split_row: u32,
    /// First column of the right pane (0 when there is no vertical split)
    pub split_col: u16,
    /// Panes are frozen rather than free-scrolling splits
    pub frozen: bool,
    /// Active pane code (see the `PANE_*` constants)
    pub active_pane: u8,
}

impl PaneInfo {
    /// Frozen rows at the top, as written by "Freeze Top Row(s)"
    pub fn frozen_rows(rows: u32) -> Self {
        Self {
            split_row: rows,
            split_col: 0,
            frozen: true,
            active_pane: PANE_LOWER_LEFT,
        }
    }

    /// The row splitting a frozen header from the body, if this pane defines one
    ///
    /// Only a frozen split whose active pane is one of the left-hand panes
    /// (code greater than 1) qualifies.
    pub fn header_split_row(&self) -> Option<u32> {
        (self.frozen && self.active_pane > PANE_UPPER_RIGHT && self.split_row > 0)
            .then_some(self.split_row)
    }
}

/// A single sheet: sparse rows, merged regions and pane info
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    name: String,
    rows: BTreeMap<u32, Row>,
    merged_regions: Vec<CellRange>,
    pane: Option<PaneInfo>,
}

impl Worksheet {
    /// Create a new, empty worksheet
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get the worksheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Rows and cells ===

    /// Insert a cell into row `row`, creating the row if needed.
    ///
    /// Returns `false` without storing anything when the column is at or
    /// past [`MAX_COLS`].
    pub fn insert_cell(&mut self, row: u32, cell: Cell) -> bool {
        if cell.col >= MAX_COLS {
            return false;
        }
        self.rows
            .entry(row)
            .or_insert_with(|| Row::new(row))
            .insert(cell)
    }

    /// Register a row without cells (the row still takes part in rendering)
    pub fn ensure_row(&mut self, row: u32) -> Result<&mut Row> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        Ok(self.rows.entry(row).or_insert_with(|| Row::new(row)))
    }

    /// Get a row by index
    pub fn row(&self, row: u32) -> Option<&Row> {
        self.rows.get(&row)
    }

    /// Rows in ascending row order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    /// Number of stored rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the cell at (row, col)
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&Cell> {
        self.rows.get(&row).and_then(|r| r.cell(col))
    }

    /// Iterate over all cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, &Cell)> {
        self.rows
            .values()
            .flat_map(|r| r.cells().iter().map(move |c| (r.index, c)))
    }

    /// Total number of stored cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(Row::cell_count).sum()
    }

    // === Merged regions ===

    /// Merged regions in registration order
    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged_regions
    }

    /// Register a merged region; regions may not overlap
    pub fn merge_cells(&mut self, range: CellRange) -> Result<()> {
        if let Some(existing) = self.merged_regions.iter().find(|r| r.overlaps(&range)) {
            return Err(Error::OverlappingMerge {
                new: range.to_string(),
                existing: existing.to_string(),
            });
        }
        self.merged_regions.push(range);
        Ok(())
    }

    /// The merged region covering (row, col), if any
    pub fn merged_region_at(&self, row: u32, col: u16) -> Option<&CellRange> {
        self.merged_regions.iter().find(|r| r.contains(row, col))
    }

    // === Panes ===

    /// Get the pane information
    pub fn pane(&self) -> Option<&PaneInfo> {
        self.pane.as_ref()
    }

    /// Set or clear the pane information
    pub fn set_pane(&mut self, pane: Option<PaneInfo>) {
        self.pane = pane;
    }
}
