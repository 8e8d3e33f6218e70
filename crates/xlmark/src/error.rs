//! Error types for the conversion pipeline

use thiserror::Error;

use crate::pdf::PdfError;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a workbook
#[derive(Debug, Error)]
pub enum Error {
    /// The input is neither a CFB (xls) nor a zip (xlsx) container
    #[error("Unrecognized spreadsheet format: {0}")]
    UnrecognizedFormat(String),

    /// The input format was recognized but its reader is compiled out
    #[error("{0} support is not enabled in this build")]
    FormatDisabled(&'static str),

    /// Empty input path
    #[error("Input path must not be empty")]
    MissingInput,

    /// Empty output path
    #[error("Output path must not be empty")]
    MissingOutput,

    /// XLS reader error
    #[cfg(feature = "xls")]
    #[error("XLS error: {0}")]
    Xls(#[from] xlmark_xls::XlsError),

    /// XLSX reader error
    #[cfg(feature = "xlsx")]
    #[error("XLSX error: {0}")]
    Xlsx(#[from] xlmark_xlsx::XlsxError),

    /// HTML rendering error
    #[error("Render error: {0}")]
    Render(#[from] xlmark_html::RenderError),

    /// PDF engine error
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
