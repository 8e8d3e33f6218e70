//! E2E tests for the XLSX reader: assemble OOXML packages in memory with
//! the zip crate, read them back with XlsxReader, and assert on the model.

mod common;
mod reading;

pub use common::*;
