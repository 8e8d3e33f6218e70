//! Document wrapper, stylesheet sourcing and output sinks

use pretty_assertions::assert_eq;
use xlmark_core::{CellValue, ColorModel, Workbook};
use xlmark_html::css::EXCEL_STYLE_CSS;
use xlmark_html::{HtmlConverter, RenderConfig, RenderError};

use crate::common::*;

#[test]
fn test_full_document_wrapper() {
    let wb = workbook_with(ColorModel::Indexed, &[(0, 0, CellValue::text("x"))]);
    let html = render(&wb);
    let lines: Vec<&str> = html.lines().collect();

    assert_eq!(
        &lines[..7],
        &[
            "<?xml version=\"1.0\" encoding=\"utf-8\" ?>",
            "<html>",
            "<head>",
            "<meta http-equiv=\"content-type\" content=\"application/xhtml+xml; charset=UTF-8\"/>",
            "</head>",
            "<body>",
            "<style type=\"text/css\">",
        ]
    );
    assert_eq!(&lines[lines.len() - 3..], &["</table>", "</body>", "</html>"]);
    assert!(html.ends_with("</html>\n"));
}

#[test]
fn test_fragment_without_wrapper() {
    let wb = workbook_with(ColorModel::Direct, &[(0, 0, CellValue::text("x"))]);
    let html = render_with(&wb, RenderConfig::new().with_full_document_wrapper(false));

    assert!(html.starts_with("<style type=\"text/css\">\n"));
    assert!(html.ends_with("</table>\n"));
    assert!(!html.contains("<html>"));
    assert!(!html.contains("<body>"));
}

#[test]
fn test_embedded_base_stylesheet_comes_first() {
    let wb = workbook_with(ColorModel::Direct, &[(0, 0, CellValue::Number(1.0))]);
    let html = render_with(&wb, RenderConfig::new().with_full_document_wrapper(false));
    let expected_start = format!("<style type=\"text/css\">\n{EXCEL_STYLE_CSS}");
    assert!(html.starts_with(&expected_start));
}

#[test]
fn test_custom_base_stylesheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.css");
    std::fs::write(&path, "table { color: teal; }\n").unwrap();

    let wb = workbook_with(ColorModel::Direct, &[(0, 0, CellValue::Number(1.0))]);
    let html = render_with(
        &wb,
        RenderConfig::new()
            .with_full_document_wrapper(false)
            .with_base_stylesheet(&path),
    );
    assert!(html.starts_with(
        "<style type=\"text/css\">\ntable { color: teal; }\n.excelDefaults .style_00 {\n"
    ));
}

#[test]
fn test_missing_stylesheet_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let wb = workbook_with(ColorModel::Direct, &[(0, 0, CellValue::Blank)]);
    let config = RenderConfig::new().with_base_stylesheet(dir.path().join("nope.css"));

    let mut out = Vec::new();
    let err = HtmlConverter::with_config(&wb, config)
        .convert(&mut out)
        .unwrap_err();
    assert!(matches!(err, RenderError::MissingStylesheet { .. }));
    assert!(out.is_empty());
}

#[test]
fn test_workbook_without_sheets() {
    let wb = Workbook::new(ColorModel::Indexed);
    let err = HtmlConverter::new(&wb).convert_to_vec().unwrap_err();
    assert!(matches!(
        err,
        RenderError::SheetOutOfBounds { index: 0, count: 0 }
    ));
}

#[test]
fn test_second_sheet_selection() {
    let mut wb = workbook_with(ColorModel::Direct, &[(0, 0, CellValue::text("first"))]);
    let mut second = xlmark_core::Worksheet::new("Second");
    second.insert_cell(0, xlmark_core::Cell::new(0, CellValue::text("second")));
    wb.push_sheet(second);

    let html = render_with(&wb, RenderConfig::new().with_sheet_index(1));
    assert!(html.contains(">second</td>"));
    assert!(!html.contains(">first</td>"));
}

#[test]
fn test_convert_file_matches_buffer() {
    let wb = workbook_with(ColorModel::Indexed, &[(0, 0, CellValue::Number(2.5))]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.html");

    HtmlConverter::new(&wb).convert_file(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), render(&wb));
}

#[test]
fn test_rendering_is_idempotent() {
    let wb = workbook_with(
        ColorModel::Indexed,
        &[
            (0, 0, CellValue::text("a")),
            (1, 2, CellValue::Number(3.0)),
            (4, 1, CellValue::Boolean(true)),
        ],
    );
    let converter = HtmlConverter::new(&wb);
    assert_eq!(
        converter.convert_to_vec().unwrap(),
        converter.convert_to_vec().unwrap()
    );
}
