//! # xlmark-html
//!
//! Renders one sheet of an [`xlmark_core::Workbook`] as a styled HTML table.
//!
//! The output is a `<style>` block followed by a `<table>`:
//! - the base stylesheet plus one `.excelDefaults .style_XX` rule per style
//!   index used anywhere in the workbook ([`css`])
//! - one `<td>` per occupied column of every existing row, with merged
//!   regions collapsed into spanning cells and frozen header rows moved
//!   into `<thead>` ([`layout`])
//! - cell text formatted through the style's number format ([`numfmt`],
//!   [`content`])
//!
//! Colors resolve through the [`StyleResolver`] matching the workbook's
//! color model.
//!
//! ## Example
//!
//! ```rust
//! use xlmark_core::{Cell, CellValue, ColorModel, Workbook, Worksheet};
//! use xlmark_html::{HtmlConverter, RenderConfig};
//!
//! let mut workbook = Workbook::new(ColorModel::Direct);
//! let mut sheet = Worksheet::new("Sheet1");
//! sheet.insert_cell(0, Cell::new(0, CellValue::text("hello")));
//! workbook.push_sheet(sheet);
//!
//! let config = RenderConfig::new().with_full_document_wrapper(false);
//! let html = HtmlConverter::with_config(&workbook, config)
//!     .convert_to_vec()
//!     .unwrap();
//! let html = String::from_utf8(html).unwrap();
//! assert!(html.starts_with("<style type=\"text/css\">"));
//! assert!(html.contains(">hello</td>"));
//! ```

pub mod config;
pub mod content;
pub mod converter;
pub mod css;
pub mod error;
pub mod layout;
pub mod numfmt;
pub mod resolver;

pub use config::RenderConfig;
pub use converter::HtmlConverter;
pub use error::{RenderError, RenderResult};
pub use layout::{ColumnBounds, SheetRenderer};
pub use resolver::{ColorDecl, DirectResolver, IndexedResolver, StyleColors, StyleResolver};
