//! # xlmark-xlsx
//!
//! XLSX (Office Open XML) reader for xlmark.
//!
//! Workbooks it produces use
//! [`ColorModel::Direct`](xlmark_core::ColorModel::Direct): colors carry
//! ARGB bytes or theme slots together with their tint, and the theme part
//! (`xl/theme/theme1.xml`) supplies the workbook's theme colors.

pub mod error;
pub mod reader;

mod styles;
mod xml;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
