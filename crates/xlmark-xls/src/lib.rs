//! # xlmark-xls
//!
//! XLS (BIFF8) reader for xlmark.
//!
//! This crate handles the legacy Excel binary format (.xls). Workbooks it
//! produces use [`ColorModel::Indexed`](xlmark_core::ColorModel::Indexed):
//! every color is a palette index, and `PALETTE` records override the
//! standard palette entries.

pub mod biff;
pub mod error;
pub mod reader;
mod styles;

pub use error::{XlsError, XlsResult};
pub use reader::XlsReader;
