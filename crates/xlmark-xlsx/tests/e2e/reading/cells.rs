//! Tests for cell values read from worksheet parts.

use std::io::Cursor;

use crate::*;
use pretty_assertions::assert_eq;
use xlmark_core::{CellError, CellValue, FormulaResult};
use xlmark_xlsx::XlsxReader;

#[test]
fn test_xlsx_cell_values() {
    let mut b = XlsxBuilder::new();
    b.shared_strings(&["Hello", "World &amp; more"]);
    b.sheet(
        "Data",
        r#"<sheetData>
<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>
<row r="2"><c r="A2"><v>42</v></c><c r="B2"><v>-0.5</v></c><c r="C2" t="b"><v>0</v></c></row>
<row r="3"><c r="A3" t="e"><v>#N/A</v></c><c r="B3" t="inlineStr"><is><t>inline</t></is></c></row>
</sheetData>"#,
    );

    let wb = XlsxReader::read(Cursor::new(b.build())).unwrap();
    let ws = wb.sheet(0).unwrap();

    assert_eq!(ws.cell_at(0, 0).unwrap().value, CellValue::text("Hello"));
    assert_eq!(ws.cell_at(0, 1).unwrap().value, CellValue::text("World & more"));
    assert_eq!(ws.cell_at(1, 0).unwrap().value, CellValue::Number(42.0));
    assert_eq!(ws.cell_at(1, 1).unwrap().value, CellValue::Number(-0.5));
    assert_eq!(ws.cell_at(1, 2).unwrap().value, CellValue::Boolean(false));
    assert_eq!(ws.cell_at(2, 0).unwrap().value, CellValue::Error(CellError::Na));
    assert_eq!(ws.cell_at(2, 1).unwrap().value, CellValue::text("inline"));
    assert_eq!(ws.cell_count(), 7);
}

#[test]
fn test_xlsx_formula_cached_results() {
    let mut b = XlsxBuilder::new();
    b.sheet(
        "Sheet1",
        r#"<sheetData><row r="1">
<c r="A1"><f>1/3</f><v>0.33333333333333331</v></c>
<c r="B1" t="b"><f>TRUE()</f><v>1</v></c>
<c r="C1" t="e"><f>1/0</f><v>#DIV/0!</v></c>
</row></sheetData>"#,
    );

    let wb = XlsxReader::read(Cursor::new(b.build())).unwrap();
    let ws = wb.sheet(0).unwrap();

    match &ws.cell_at(0, 0).unwrap().value {
        CellValue::Formula { text, cached } => {
            assert_eq!(text, "1/3");
            assert!(matches!(cached, FormulaResult::Number(n) if (n - 1.0 / 3.0).abs() < 1e-12));
        }
        other => panic!("expected formula, got {other:?}"),
    }
    assert_eq!(
        ws.cell_at(0, 1).unwrap().value,
        CellValue::formula("TRUE()", FormulaResult::Boolean(true))
    );
    assert_eq!(
        ws.cell_at(0, 2).unwrap().value,
        CellValue::formula("1/0", FormulaResult::Error(CellError::Div0))
    );
}

#[test]
fn test_xlsx_shared_string_escapes() {
    let mut b = XlsxBuilder::new();
    b.shared_strings(&["one_x000a_two", "  padded  "]);
    b.sheet(
        "Sheet1",
        r#"<sheetData><row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="s"><v>7</v></c></row></sheetData>"#,
    );

    let wb = XlsxReader::read(Cursor::new(b.build())).unwrap();
    let ws = wb.sheet(0).unwrap();
    assert_eq!(ws.cell_at(0, 0).unwrap().value, CellValue::text("one\ntwo"));
    assert_eq!(ws.cell_at(0, 1).unwrap().value, CellValue::text("  padded  "));
    // out-of-range index reads as empty text
    assert_eq!(ws.cell_at(0, 2).unwrap().value, CellValue::text(""));
}
