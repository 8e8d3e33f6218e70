//! Render options

use std::path::PathBuf;

/// Options controlling one HTML conversion
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Wrap the table in an XHTML document (`<html>`, `<head>`, `<body>`)
    pub emit_full_document_wrapper: bool,
    /// Base stylesheet written before the per-style rules; the embedded
    /// `excel_style.css` when `None`
    pub base_stylesheet: Option<PathBuf>,
    /// Index of the sheet to render
    pub sheet_index: usize,
    /// Render a lettered column heading row
    pub column_headings: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            emit_full_document_wrapper: true,
            base_stylesheet: None,
            sheet_index: 0,
            column_headings: false,
        }
    }
}

impl RenderConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit the document wrapper, or only the `<style>` block and table
    pub fn with_full_document_wrapper(mut self, emit: bool) -> Self {
        self.emit_full_document_wrapper = emit;
        self
    }

    /// Read the base stylesheet from a file
    pub fn with_base_stylesheet<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.base_stylesheet = Some(path.into());
        self
    }

    /// Render the sheet at `index`
    pub fn with_sheet_index(mut self, index: usize) -> Self {
        self.sheet_index = index;
        self
    }

    /// Render the column heading row
    pub fn with_column_headings(mut self, headings: bool) -> Self {
        self.column_headings = headings;
        self
    }
}
