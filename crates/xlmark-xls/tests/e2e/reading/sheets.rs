//! Tests for sheet structure: sheet order, rows, merges and panes.

use std::io::Cursor;

use crate::*;
use pretty_assertions::assert_eq;
use xlmark_core::{CellRange, PaneInfo};
use xlmark_xls::{XlsError, XlsReader};

#[test]
fn test_xls_multiple_sheets_in_order() {
    let mut b = XlsBuilder::new();
    b.sheet("First", vec![number(0, 0, 0, 1.0)]);
    b.sheet("Second", vec![number(0, 0, 0, 2.0)]);

    let wb = XlsReader::read(Cursor::new(b.build())).unwrap();
    let names: Vec<&str> = wb.sheets().map(|s| s.name()).collect();
    assert_eq!(names, vec!["First", "Second"]);
    assert_eq!(
        wb.sheet(1).unwrap().cell_at(0, 0).unwrap().value.as_number(),
        Some(2.0)
    );
}

#[test]
fn test_xls_empty_rows_are_kept() {
    let mut b = XlsBuilder::new();
    b.sheet("Sheet1", vec![row(0), row(2), number(2, 1, 0, 5.0)]);

    let wb = XlsReader::read(Cursor::new(b.build())).unwrap();
    let ws = wb.sheet(0).unwrap();
    assert_eq!(ws.row_count(), 2);
    assert!(ws.row(0).unwrap().is_empty());
    assert!(ws.row(1).is_none());
}

#[test]
fn test_xls_merged_regions() {
    let mut b = XlsBuilder::new();
    b.sheet(
        "Sheet1",
        vec![
            number(0, 0, 0, 1.0),
            mergecells(&[(0, 1, 0, 2), (3, 3, 1, 2), (1, 1, 1, 1)]),
        ],
    );

    let wb = XlsReader::read(Cursor::new(b.build())).unwrap();
    let ws = wb.sheet(0).unwrap();
    // The third range overlaps the first and is dropped
    assert_eq!(
        ws.merged_regions(),
        &[
            CellRange::parse("A1:C2").unwrap(),
            CellRange::parse("B4:C4").unwrap()
        ]
    );
}

#[test]
fn test_xls_frozen_pane() {
    let mut b = XlsBuilder::new();
    b.sheet("Sheet1", vec![window2(true), pane(0, 2, 2)]);

    let wb = XlsReader::read(Cursor::new(b.build())).unwrap();
    let pane = wb.sheet(0).unwrap().pane().copied().unwrap();
    assert_eq!(pane, PaneInfo::frozen_rows(2));
    assert_eq!(pane.header_split_row(), Some(2));
}

#[test]
fn test_xls_split_pane_is_not_frozen() {
    let mut b = XlsBuilder::new();
    b.sheet("Sheet1", vec![window2(false), pane(0, 3, 2)]);

    let wb = XlsReader::read(Cursor::new(b.build())).unwrap();
    let pane = wb.sheet(0).unwrap().pane().copied().unwrap();
    assert!(!pane.frozen);
    assert_eq!(pane.header_split_row(), None);
}

#[test]
fn test_xls_read_file() {
    let mut b = XlsBuilder::new();
    b.sheet("OnDisk", vec![label(0, 0, 0, "x")]);
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), b.build()).unwrap();

    let wb = XlsReader::read_file(file.path()).unwrap();
    assert_eq!(wb.sheet(0).unwrap().name(), "OnDisk");
}

#[test]
fn test_xls_rejects_non_cfb() {
    let err = XlsReader::read(Cursor::new(b"not a compound file".to_vec())).unwrap_err();
    assert!(matches!(err, XlsError::Io(_)));
}

#[test]
fn test_xls_rejects_biff5() {
    let mut stream = record(BOF, &[0x00, 0x05, 0x05, 0x00]);
    stream.extend(record(EOF, &[]));
    let err = XlsReader::read(Cursor::new(wrap_in_cfb(&stream))).unwrap_err();
    assert!(matches!(err, XlsError::UnsupportedVersion(0x0500)));
}
