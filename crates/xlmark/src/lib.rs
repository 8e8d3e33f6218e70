//! # xlmark
//!
//! Converts Excel workbooks into styled HTML tables, and optionally on to PDF.
//!
//! xlmark reads legacy binary (.xls) and Office Open XML (.xlsx) workbooks,
//! renders one sheet as a `<table>` whose inline CSS reproduces the cell
//! styling, merged regions and frozen header rows, and can hand the result to
//! an external HTML-to-PDF engine.
//!
//! ## Features
//!
//! - `xlsx` (default): read XLSX files
//! - `xls` (default): read XLS (BIFF8) files
//!
//! ## Example
//!
//! ```rust,no_run
//! use xlmark::prelude::*;
//!
//! // Render the first sheet as a standalone HTML document
//! xlmark::convert_to_html("report.xlsx", "report.html", &RenderConfig::default())?;
//!
//! // Or work with the workbook directly
//! let workbook = xlmark::open_workbook("report.xls")?;
//! let html = HtmlConverter::new(&workbook).convert_to_vec()?;
//! # Ok::<(), xlmark::Error>(())
//! ```

pub mod error;
pub mod format;
pub mod pdf;
pub mod prelude;

pub use error::{Error, Result};
pub use format::SpreadsheetFormat;
pub use pdf::{CommandPdfEngine, PageSize, PdfEngine, PdfEngineConfig, PdfError};

// Re-export core types
pub use xlmark_core::{
    Cell, CellAddress, CellError, CellRange, CellStyle, CellValue, Color, ColorModel, Font,
    FontId, FormulaResult, PaneInfo, Row, StyleId, Workbook, Worksheet,
};

// Re-export the renderer
pub use xlmark_html::{HtmlConverter, RenderConfig, RenderError};

// Re-export I/O types
#[cfg(feature = "xls")]
pub use xlmark_xls::{XlsError, XlsReader};
#[cfg(feature = "xlsx")]
pub use xlmark_xlsx::{XlsxError, XlsxReader};

use std::fs::{self, File};
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Open a workbook, choosing the reader from the file's leading bytes
pub fn open_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::MissingInput);
    }
    let file = File::open(path)?;
    read_workbook(BufReader::new(file))
}

/// Read a workbook from a seekable stream, sniffing its container format
pub fn read_workbook<R: Read + Seek>(mut reader: R) -> Result<Workbook> {
    let mut header = Vec::with_capacity(8);
    reader.by_ref().take(8).read_to_end(&mut header)?;
    reader.seek(SeekFrom::Start(0))?;

    let format = SpreadsheetFormat::sniff(&header).ok_or_else(|| {
        Error::UnrecognizedFormat(format!("leading bytes {:02X?}", header.as_slice()))
    })?;
    tracing::debug!(format = format.name(), "detected spreadsheet container");

    match format {
        #[cfg(feature = "xls")]
        SpreadsheetFormat::Xls => Ok(XlsReader::read(reader)?),
        #[cfg(feature = "xlsx")]
        SpreadsheetFormat::Xlsx => Ok(XlsxReader::read(reader)?),
        #[allow(unreachable_patterns)]
        other => Err(Error::FormatDisabled(other.name())),
    }
}

/// Render the configured sheet of `input` as HTML into `output`
pub fn convert_to_html<P, Q>(input: P, output: Q, config: &RenderConfig) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());
    if output.as_os_str().is_empty() {
        return Err(Error::MissingOutput);
    }
    let workbook = open_workbook(input)?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        sheet = config.sheet_index,
        "converting to HTML"
    );
    HtmlConverter::with_config(&workbook, config.clone()).convert_file(output)?;
    Ok(())
}

/// Render the configured sheet of `input` as HTML, then to an A2 PDF
pub fn convert_to_pdf<P, Q>(
    input: P,
    output: Q,
    engine: &dyn PdfEngine,
    config: &RenderConfig,
) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    convert_to_pdf_sized(input, output, engine, config, PageSize::A2)
}

/// Like [`convert_to_pdf`] with an explicit page size
pub fn convert_to_pdf_sized<P, Q>(
    input: P,
    output: Q,
    engine: &dyn PdfEngine,
    config: &RenderConfig,
    page: PageSize,
) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());
    if output.as_os_str().is_empty() {
        return Err(Error::MissingOutput);
    }
    let workbook = open_workbook(input)?;

    let html = HtmlConverter::with_config(&workbook, config.clone()).convert_to_vec()?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        page = %page,
        html_bytes = html.len(),
        "converting to PDF"
    );

    let mut pdf = Vec::new();
    engine.render(&html, page, &mut pdf)?;
    fs::write(output, pdf)?;
    Ok(())
}
