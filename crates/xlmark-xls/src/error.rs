//! XLS error types

use thiserror::Error;

/// Result type for XLS operations
pub type XlsResult<T> = std::result::Result<T, XlsError>;

/// Errors that can occur while reading an XLS file
#[derive(Debug, Error)]
pub enum XlsError {
    /// IO error (also covers CFB errors which use std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid file format
    #[error("Invalid XLS format: {0}")]
    InvalidFormat(String),

    /// BIFF version other than BIFF8
    #[error("Unsupported BIFF version 0x{0:04X} (expected BIFF8)")]
    UnsupportedVersion(u16),

    /// A record body ended before a field could be read
    #[error("Record truncated at offset {offset}: need {needed} more byte(s)")]
    Truncated { offset: usize, needed: usize },

    /// Core model error
    #[error("Core error: {0}")]
    Core(#[from] xlmark_core::Error),
}
