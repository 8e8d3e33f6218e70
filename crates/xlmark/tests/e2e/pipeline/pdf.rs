//! HTML-to-PDF chaining through a stub engine

use std::cell::RefCell;
use std::io::Write;

use crate::*;
use pretty_assertions::assert_eq;
use xlmark::{Error, PageSize, PdfEngine, PdfError, RenderConfig};

/// Records what it was asked to render and emits a fixed document
#[derive(Default)]
struct RecordingEngine {
    seen: RefCell<Vec<(String, PageSize)>>,
}

impl PdfEngine for RecordingEngine {
    fn render(&self, html: &[u8], page: PageSize, out: &mut dyn Write) -> Result<(), PdfError> {
        self.seen
            .borrow_mut()
            .push((String::from_utf8_lossy(html).into_owned(), page));
        out.write_all(b"%PDF-1.4\n%%EOF\n")?;
        Ok(())
    }
}

struct BrokenEngine;

impl PdfEngine for BrokenEngine {
    fn render(&self, _html: &[u8], _page: PageSize, _out: &mut dyn Write) -> Result<(), PdfError> {
        Err(PdfError::EmptyOutput)
    }
}

#[test]
fn test_pdf_receives_full_document_on_a2() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "in.xlsx", &xlsx_bytes(&["Q1", "Q2"]));
    let output = dir.path().join("out.pdf");
    let engine = RecordingEngine::default();

    xlmark::convert_to_pdf(&input, &output, &engine, &RenderConfig::default()).unwrap();

    assert_eq!(std::fs::read(&output).unwrap(), b"%PDF-1.4\n%%EOF\n");
    let seen = engine.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].1, PageSize::A2);
    assert!(seen[0].0.contains("<table class=excelDefaults>"));
    assert!(seen[0].0.contains(">Q2</td>"));
}

#[test]
fn test_pdf_page_size_override() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "in.xls", &xls_bytes(&["x"]));
    let output = dir.path().join("out.pdf");
    let engine = RecordingEngine::default();

    xlmark::convert_to_pdf_sized(
        &input,
        &output,
        &engine,
        &RenderConfig::default(),
        PageSize::Letter,
    )
    .unwrap();
    assert_eq!(engine.seen.borrow()[0].1, PageSize::Letter);
}

#[test]
fn test_engine_failure_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "in.xlsx", &xlsx_bytes(&["x"]));
    let output = dir.path().join("out.pdf");

    let err = xlmark::convert_to_pdf(&input, &output, &BrokenEngine, &RenderConfig::default())
        .unwrap_err();
    assert!(matches!(err, Error::Pdf(PdfError::EmptyOutput)));
    assert!(!output.exists());
}

#[test]
fn test_pdf_requires_output_path() {
    let engine = RecordingEngine::default();
    assert!(matches!(
        xlmark::convert_to_pdf("in.xlsx", "", &engine, &RenderConfig::default()),
        Err(Error::MissingOutput)
    ));
    assert!(engine.seen.borrow().is_empty());
}
