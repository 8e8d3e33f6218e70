//! Cell-related types
//!
//! This module contains:
//! - [`Cell`] - A cell's column, style reference and value
//! - [`CellValue`] - The typed value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A rectangular block of cells (e.g., "A1:B10")

mod address;
mod value;

pub use address::{CellAddress, CellRange};
pub use value::{CellError, CellValue, FormulaResult};

use crate::style::StyleId;

/// A single populated cell within a [`Row`](crate::Row)
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Column index (0-based)
    pub col: u16,
    /// Style reference; `None` means the workbook default style 0
    pub style: Option<StyleId>,
    /// Cell value
    pub value: CellValue,
}

impl Cell {
    /// Create an unstyled cell
    pub fn new(col: u16, value: CellValue) -> Self {
        Self {
            col,
            style: None,
            value,
        }
    }

    /// Attach a style reference
    pub fn with_style(mut self, style: StyleId) -> Self {
        self.style = Some(style);
        self
    }

    /// The effective style index, falling back to the default style
    pub fn style_id(&self) -> StyleId {
        self.style.unwrap_or_default()
    }
}
