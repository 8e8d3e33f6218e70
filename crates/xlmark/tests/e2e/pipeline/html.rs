//! File-to-file HTML conversion

use crate::*;
use pretty_assertions::assert_eq;
use xlmark::{Error, RenderConfig, RenderError};

#[test]
fn test_convert_xlsx_to_html() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "in.xlsx", &xlsx_bytes(&["Total", "a&lt;b"]));
    let output = dir.path().join("out.html");

    xlmark::convert_to_html(&input, &output, &RenderConfig::default()).unwrap();

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\" ?>"));
    assert!(html.contains(">Total</td>"));
    assert!(html.contains(">a&lt;b</td>"));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn test_convert_xls_fragment() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "in.xls", &xls_bytes(&["one", "two"]));
    let output = dir.path().join("out.html");

    let config = RenderConfig::new().with_full_document_wrapper(false);
    xlmark::convert_to_html(&input, &output, &config).unwrap();

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<style type=\"text/css\">"));
    assert_eq!(html.matches("<col/>").count(), 3);
    assert!(html.contains(">two</td>"));
}

#[test]
fn test_sheet_index_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "in.xlsx", &xlsx_bytes(&["x"]));
    let output = dir.path().join("out.html");

    let err = xlmark::convert_to_html(&input, &output, &RenderConfig::new().with_sheet_index(3))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Render(RenderError::SheetOutOfBounds { index: 3, count: 1 })
    ));
}

#[test]
fn test_empty_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "in.xlsx", &xlsx_bytes(&["x"]));
    assert!(matches!(
        xlmark::convert_to_html(&input, "", &RenderConfig::default()),
        Err(Error::MissingOutput)
    ));
}
