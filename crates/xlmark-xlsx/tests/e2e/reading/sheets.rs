//! Tests for package structure: sheet order, rows, merges, panes and errors.

use std::io::{Cursor, Write};

use crate::*;
use pretty_assertions::assert_eq;
use xlmark_core::worksheet::PANE_LOWER_LEFT;
use xlmark_core::{CellRange, ColorModel, PaneInfo};
use xlmark_xlsx::{XlsxError, XlsxReader};

#[test]
fn test_xlsx_multiple_sheets_in_order() {
    let mut b = XlsxBuilder::new();
    b.sheet("Summary", r#"<sheetData><row r="1"><c r="A1"><v>1</v></c></row></sheetData>"#);
    b.sheet("Detail", r#"<sheetData><row r="1"><c r="A1"><v>2</v></c></row></sheetData>"#);
    b.sheet("Empty", "<sheetData/>");

    let wb = XlsxReader::read(Cursor::new(b.build())).unwrap();
    assert_eq!(wb.color_model(), ColorModel::Direct);
    let names: Vec<&str> = wb.sheets().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Summary", "Detail", "Empty"]);
    assert_eq!(
        wb.sheet(1).unwrap().cell_at(0, 0).unwrap().value.as_number(),
        Some(2.0)
    );
    assert_eq!(wb.sheet(2).unwrap().row_count(), 0);
}

#[test]
fn test_xlsx_empty_rows_are_kept() {
    let mut b = XlsxBuilder::new();
    b.sheet(
        "Sheet1",
        r#"<sheetData><row r="1" ht="20" customHeight="1"/><row r="3"><c r="B3"><v>5</v></c></row></sheetData>"#,
    );

    let wb = XlsxReader::read(Cursor::new(b.build())).unwrap();
    let ws = wb.sheet(0).unwrap();
    assert_eq!(ws.row_count(), 2);
    assert!(ws.row(0).unwrap().is_empty());
    assert!(ws.row(1).is_none());
    assert_eq!(ws.cell_at(2, 1).unwrap().value.as_number(), Some(5.0));
}

#[test]
fn test_xlsx_merges_and_frozen_header() {
    let mut b = XlsxBuilder::new();
    b.sheet(
        "Sheet1",
        r#"<sheetViews><sheetView tabSelected="1" workbookViewId="0"><pane ySplit="1" topLeftCell="A2" activePane="bottomLeft" state="frozen"/><selection pane="bottomLeft" activeCell="A2" sqref="A2"/></sheetView></sheetViews>
<sheetData><row r="1"><c r="A1"><v>1</v></c></row></sheetData>
<mergeCells count="2"><mergeCell ref="A1:B1"/><mergeCell ref="A1:A3"/></mergeCells>"#,
    );

    let wb = XlsxReader::read(Cursor::new(b.build())).unwrap();
    let ws = wb.sheet(0).unwrap();
    // the second region overlaps the first and is dropped
    assert_eq!(ws.merged_regions(), &[CellRange::from_indices(0, 0, 0, 1)]);
    assert_eq!(
        ws.pane(),
        Some(&PaneInfo {
            split_row: 1,
            split_col: 0,
            frozen: true,
            active_pane: PANE_LOWER_LEFT,
        })
    );
    assert_eq!(ws.pane().unwrap().header_split_row(), Some(1));
}

#[test]
fn test_xlsx_date1904() {
    let mut b = XlsxBuilder::new();
    b.date1904();
    b.sheet("Sheet1", "<sheetData/>");
    let wb = XlsxReader::read(Cursor::new(b.build())).unwrap();
    assert!(wb.date1904());
}

#[test]
fn test_xlsx_read_file() {
    let mut b = XlsxBuilder::new();
    b.sheet("Sheet1", r#"<sheetData><row r="1"><c r="A1"><v>3</v></c></row></sheetData>"#);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&b.build()).unwrap();

    let wb = XlsxReader::read_file(file.path()).unwrap();
    assert_eq!(wb.sheet_count(), 1);
}

#[test]
fn test_xlsx_missing_content_types() {
    let mut b = XlsxBuilder::new();
    b.without_content_types();
    b.sheet("Sheet1", "<sheetData/>");
    let err = XlsxReader::read(Cursor::new(b.build())).unwrap_err();
    assert!(matches!(err, XlsxError::InvalidFormat(_)));
}

#[test]
fn test_xlsx_not_a_zip() {
    let err = XlsxReader::read(Cursor::new(b"definitely not a zip".to_vec())).unwrap_err();
    assert!(matches!(err, XlsxError::Zip(_)));
}
