//! Reader dispatch on the container's leading bytes

use std::io::Cursor;

use crate::*;
use pretty_assertions::assert_eq;
use xlmark::{CellValue, ColorModel, Error};

#[test]
fn test_xlsx_is_read_by_content() {
    let wb = xlmark::read_workbook(Cursor::new(xlsx_bytes(&["north", "south"]))).unwrap();
    assert_eq!(wb.color_model(), ColorModel::Direct);
    let row = wb.sheet(0).unwrap().rows().next().unwrap();
    assert_eq!(row.cell(1).unwrap().value, CellValue::text("south"));
}

#[test]
fn test_xls_is_read_by_content() {
    let wb = xlmark::read_workbook(Cursor::new(xls_bytes(&["east"]))).unwrap();
    assert_eq!(wb.color_model(), ColorModel::Indexed);
    assert_eq!(wb.sheet(0).unwrap().name(), "Sheet1");
    let row = wb.sheet(0).unwrap().rows().next().unwrap();
    assert_eq!(row.cell(0).unwrap().value, CellValue::text("east"));
}

#[test]
fn test_extension_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "misnamed.xls", &xlsx_bytes(&["x"]));
    let wb = xlmark::open_workbook(&path).unwrap();
    assert_eq!(wb.color_model(), ColorModel::Direct);
}

#[test]
fn test_unrecognized_content() {
    let err = xlmark::read_workbook(Cursor::new(b"name,value\nA,1\n".to_vec())).unwrap_err();
    assert!(matches!(err, Error::UnrecognizedFormat(_)));

    let err = xlmark::read_workbook(Cursor::new(Vec::new())).unwrap_err();
    assert!(matches!(err, Error::UnrecognizedFormat(_)));
}

#[test]
fn test_missing_input() {
    assert!(matches!(
        xlmark::open_workbook(""),
        Err(Error::MissingInput)
    ));

    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        xlmark::open_workbook(dir.path().join("absent.xlsx")),
        Err(Error::Io(_))
    ));
}
