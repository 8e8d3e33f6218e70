//! E2E tests for the HTML renderer: build workbooks in memory, render them
//! with HtmlConverter, and assert on the produced markup.

mod common;

pub use common::*;
