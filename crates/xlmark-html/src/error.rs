//! Rendering error types

use std::path::PathBuf;

use thiserror::Error;
use xlmark_core::StyleId;

/// Result type for rendering operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while rendering a workbook to HTML
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the output sink failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured base stylesheet could not be read
    #[error("Cannot read stylesheet {}: {source}", path.display())]
    MissingStylesheet {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A style carries a color the workbook's color model cannot express
    #[error("Unsupported color in style {index}: {detail}")]
    UnsupportedStyle { index: StyleId, detail: String },

    /// The requested sheet does not exist
    #[error("Sheet index {index} out of bounds (workbook has {count} sheets)")]
    SheetOutOfBounds { index: usize, count: usize },

    /// Core model error
    #[error("Core error: {0}")]
    Core(#[from] xlmark_core::Error),
}
