//! # xlmark-core
//!
//! In-memory workbook model shared by the xlmark readers and the HTML renderer.
//!
//! The model is a read-only snapshot once a reader has produced it:
//! - [`Workbook`] owns the sheets plus flat font and style tables
//! - [`Worksheet`] holds sparse [`Row`]s, merged regions and pane info
//! - [`Cell`] carries a [`CellValue`] and an optional [`StyleId`]
//! - [`CellStyle`] and [`Font`] reference colors through [`Color`], whose
//!   variants follow the two on-disk color schemes
//!
//! ## Example
//!
//! ```rust
//! use xlmark_core::{Cell, CellValue, ColorModel, Workbook, Worksheet};
//!
//! let mut workbook = Workbook::new(ColorModel::Direct);
//! let mut sheet = Worksheet::new("Sheet1");
//! sheet.insert_cell(0, Cell::new(0, CellValue::Number(42.0)));
//! sheet.insert_cell(1, Cell::new(1, CellValue::text("hello")));
//! workbook.push_sheet(sheet);
//!
//! assert_eq!(workbook.sheet(0).unwrap().row_count(), 2);
//! ```

pub mod cell;
pub mod error;
pub mod row;
pub mod style;
pub mod workbook;
pub mod worksheet;

pub use cell::{Cell, CellAddress, CellError, CellRange, CellValue, FormulaResult};
pub use error::{Error, Result};
pub use row::Row;
pub use style::{
    apply_tint, builtin_format, rotation_degrees, BorderEdge, BorderLineStyle, Borders, CellStyle,
    Color, Fill, Font, FontId, HorizontalAlignment, Palette, PatternType, StyleId, ThemeColors,
    VerticalAlignment, AUTOMATIC_INDEX, ROTATION_STACKED,
};
pub use workbook::{ColorModel, Workbook};
pub use worksheet::{PaneInfo, Worksheet};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;
