//! Workbook to HTML conversion

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use xlmark_core::{Workbook, Worksheet};

use crate::config::RenderConfig;
use crate::css;
use crate::error::{RenderError, RenderResult};
use crate::layout::SheetRenderer;
use crate::resolver::StyleResolver;

/// Renders one sheet of a workbook as a styled HTML table
///
/// The converter borrows the workbook snapshot; every call to
/// [`convert`](Self::convert) is an independent render pass.
pub struct HtmlConverter<'wb> {
    workbook: &'wb Workbook,
    config: RenderConfig,
}

impl<'wb> HtmlConverter<'wb> {
    /// Create a converter with the default configuration
    pub fn new(workbook: &'wb Workbook) -> Self {
        Self::with_config(workbook, RenderConfig::default())
    }

    /// Create a converter with the given configuration
    pub fn with_config(workbook: &'wb Workbook, config: RenderConfig) -> Self {
        Self { workbook, config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render into `writer`
    ///
    /// Output is buffered and flushed at the end. A failed flush is only
    /// reported when rendering itself succeeded.
    pub fn convert<W: Write>(&self, writer: W) -> RenderResult<()> {
        let mut out = BufWriter::new(writer);
        let rendered = self.write_document(&mut out);
        let flushed = out.flush();
        rendered?;
        flushed?;
        Ok(())
    }

    /// Render into a file, creating or truncating it
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        let file = File::create(path)?;
        self.convert(file)
    }

    /// Render into a byte buffer
    pub fn convert_to_vec(&self) -> RenderResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.convert(&mut buf)?;
        Ok(buf)
    }

    fn sheet(&self) -> RenderResult<&'wb Worksheet> {
        self.workbook
            .sheet(self.config.sheet_index)
            .map_err(|_| RenderError::SheetOutOfBounds {
                index: self.config.sheet_index,
                count: self.workbook.sheet_count(),
            })
    }

    fn write_document<W: Write + ?Sized>(&self, out: &mut W) -> RenderResult<()> {
        // fail before any output is written
        let sheet = self.sheet()?;
        let base = css::load_base_stylesheet(self.config.base_stylesheet.as_deref())?;

        let resolver = StyleResolver::for_workbook(self.workbook);
        tracing::debug!(
            color_model = ?self.workbook.color_model(),
            sheet = sheet.name(),
            "rendering workbook"
        );

        if self.config.emit_full_document_wrapper {
            writeln!(out, "<?xml version=\"1.0\" encoding=\"utf-8\" ?>")?;
            writeln!(out, "<html>")?;
            writeln!(out, "<head>")?;
            writeln!(
                out,
                "<meta http-equiv=\"content-type\" content=\"application/xhtml+xml; charset=UTF-8\"/>"
            )?;
            writeln!(out, "</head>")?;
            writeln!(out, "<body>")?;
        }

        writeln!(out, "<style type=\"text/css\">")?;
        css::emit_stylesheet(self.workbook, &resolver, &base, out)?;
        writeln!(out, "</style>")?;

        SheetRenderer::new(self.workbook, sheet)
            .with_column_headings(self.config.column_headings)
            .render(out)?;

        if self.config.emit_full_document_wrapper {
            writeln!(out, "</body>")?;
            writeln!(out, "</html>")?;
        }
        Ok(())
    }
}
