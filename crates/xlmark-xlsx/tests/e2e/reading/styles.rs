//! Tests for stylesheet and theme parts.

use std::io::Cursor;

use crate::*;
use pretty_assertions::assert_eq;
use xlmark_core::{
    BorderLineStyle, Color, FontId, HorizontalAlignment, PatternType, StyleId, VerticalAlignment,
};
use xlmark_xlsx::XlsxReader;

const STYLES: &str = r##"
<numFmts count="1"><numFmt numFmtId="165" formatCode="#,##0.00"/></numFmts>
<fonts count="2">
  <font><sz val="11"/><name val="Calibri"/></font>
  <font><b/><i/><sz val="16"/><color theme="4" tint="-0.25"/><name val="Georgia"/></font>
</fonts>
<fills count="3">
  <fill><patternFill patternType="none"/></fill>
  <fill><patternFill patternType="gray125"/></fill>
  <fill><patternFill patternType="solid"><fgColor rgb="FFFFFF00"/><bgColor indexed="64"/></patternFill></fill>
</fills>
<borders count="2">
  <border/>
  <border><left style="thin"><color rgb="FF0000FF"/></left><right/><top style="double"><color auto="1"/></top><bottom style="hair"><color indexed="10"/></bottom></border>
</borders>
<cellXfs count="2">
  <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  <xf numFmtId="165" fontId="1" fillId="2" borderId="1" applyAlignment="1"><alignment horizontal="centerContinuous" vertical="center" textRotation="90"/></xf>
</cellXfs>"##;

#[test]
fn test_xlsx_styles_resolve() {
    let mut b = XlsxBuilder::new();
    b.styles(STYLES);
    b.sheet(
        "Sheet1",
        r#"<sheetData><row r="1"><c r="A1" s="1"><v>1234.5</v></c><c r="B1"><v>1</v></c></row></sheetData>"#,
    );

    let wb = XlsxReader::read(Cursor::new(b.build())).unwrap();
    let ws = wb.sheet(0).unwrap();
    let cell = ws.cell_at(0, 0).unwrap();
    assert_eq!(cell.style, Some(StyleId(1)));
    assert_eq!(ws.cell_at(0, 1).unwrap().style, None);

    let style = wb.style(cell.style_id()).unwrap();
    assert_eq!(style.number_format, "#,##0.00");
    assert_eq!(style.horizontal, HorizontalAlignment::CenterContinuous);
    assert_eq!(style.vertical, VerticalAlignment::Center);
    assert_eq!(style.rotation, 90);
    assert_eq!(style.fill.pattern, PatternType::Solid);
    assert_eq!(style.fill.foreground, Color::rgb(0xFF, 0xFF, 0x00));
    assert_eq!(style.borders.left.style, BorderLineStyle::Thin);
    assert_eq!(style.borders.left.color, Color::rgb(0, 0, 0xFF));
    assert_eq!(style.borders.top.style, BorderLineStyle::Double);
    assert_eq!(style.borders.bottom.style, BorderLineStyle::Hair);
    assert_eq!(style.borders.bottom.color, Color::Indexed(10));

    assert_eq!(style.font, FontId(1));
    let font = wb.font(style.font).unwrap();
    assert_eq!(font.name, "Georgia");
    assert_eq!(font.height_in_points(), 16);
    assert!(font.bold);
    assert!(font.italic);
    assert_eq!(font.color, Color::theme(4, -0.25));
}

#[test]
fn test_xlsx_without_stylesheet_keeps_default_style() {
    let mut b = XlsxBuilder::new();
    b.sheet(
        "Sheet1",
        r#"<sheetData><row r="1"><c r="A1" s="3"><v>1</v></c></row></sheetData>"#,
    );

    let wb = XlsxReader::read(Cursor::new(b.build())).unwrap();
    assert_eq!(wb.styles().len(), 1);
    assert_eq!(wb.sheet(0).unwrap().cell_at(0, 0).unwrap().style, None);
}

#[test]
fn test_xlsx_theme_colors() {
    let mut b = XlsxBuilder::new();
    b.theme(theme_xml([
        "000000", "FFFFFF", "44546A", "E7E6E6", "4472C4", "ED7D31", "A5A5A5", "FFC000",
        "5B9BD5", "70AD47", "0563C1", "954F72",
    ]));
    b.sheet("Sheet1", "<sheetData/>");

    let wb = XlsxReader::read(Cursor::new(b.build())).unwrap();
    // light 1 comes first in style order
    assert_eq!(wb.theme().get(0), Some([0xFF, 0xFF, 0xFF]));
    assert_eq!(wb.theme().get(1), Some([0, 0, 0]));
    assert_eq!(wb.theme().get(2), Some([0xE7, 0xE6, 0xE6]));
    assert_eq!(wb.theme().get(4), Some([0x44, 0x72, 0xC4]));
}
