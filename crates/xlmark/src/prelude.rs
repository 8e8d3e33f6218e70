//! Prelude module - common imports for xlmark users
//!
//! ```rust
//! use xlmark::prelude::*;
//! ```

pub use crate::{
    // Cell types
    Cell,
    CellAddress,
    CellRange,
    CellValue,
    // Rendering
    CommandPdfEngine,
    // Error types
    Error,
    HtmlConverter,
    PageSize,
    PdfEngine,
    RenderConfig,
    Result,
    SpreadsheetFormat,
    // Main types
    Workbook,
    Worksheet,
};

#[cfg(feature = "xls")]
pub use crate::XlsReader;
#[cfg(feature = "xlsx")]
pub use crate::XlsxReader;
