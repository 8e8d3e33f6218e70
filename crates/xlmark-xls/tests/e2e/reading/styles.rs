//! Tests for reading cell styles from XLS streams.

use std::io::Cursor;

use crate::*;
use pretty_assertions::assert_eq;
use xlmark_core::{
    BorderLineStyle, Color, FontId, HorizontalAlignment, PatternType, StyleId, VerticalAlignment,
};
use xlmark_xls::XlsReader;

fn styled_workbook() -> xlmark_core::Workbook {
    let mut b = XlsBuilder::bare();
    for i in 0..5 {
        b.push_global(font(200 + i * 20, false, false, 0x7FFF, "Arial"));
    }
    b.push_global(font(280, true, true, 10, "Verdana"));
    b.push_global(format(164, "0.000"));
    b.push_global(xf(XfFields::new()));
    b.push_global(xf(XfFields {
        font: 6,
        format: 164,
        halign: 3,
        valign: 1,
        rotation: 90,
        borders: [1, 2, 8, 6],
        border_colors: [10, 12, 64, 8],
        pattern: 1,
        fill_fore: 13,
        fill_back: 64,
    }));
    b.push_global(xf(XfFields {
        format: 10,
        halign: 2,
        ..XfFields::new()
    }));
    let mut entries = 1u16.to_le_bytes().to_vec();
    entries.extend_from_slice(&[0x11, 0x22, 0x33, 0x00]);
    b.push_global(record(PALETTE, &entries));
    b.sheet(
        "Styled",
        vec![number(0, 0, 1, 1.0), number(0, 1, 2, 0.5), number(0, 2, 99, 2.0)],
    );

    XlsReader::read(Cursor::new(b.build())).unwrap()
}

#[test]
fn test_xls_font_table() {
    let wb = styled_workbook();
    let style = wb.style(StyleId(1)).unwrap();
    // Font index 6 is the sixth FONT record because index 4 is never written
    assert_eq!(style.font, FontId(5));
    let font = wb.font(style.font).unwrap();
    assert_eq!(font.name, "Verdana");
    assert_eq!(font.height_in_points(), 14);
    assert!(font.bold);
    assert!(font.italic);
    assert_eq!(font.color, Color::Indexed(10));
}

#[test]
fn test_xls_alignment_and_format() {
    let wb = styled_workbook();
    let style = wb.style(StyleId(1)).unwrap();
    assert_eq!(style.horizontal, HorizontalAlignment::Right);
    assert_eq!(style.vertical, VerticalAlignment::Center);
    assert_eq!(style.rotation, 90);
    assert_eq!(style.number_format, "0.000");

    let builtin = wb.style(StyleId(2)).unwrap();
    assert_eq!(builtin.number_format, "0.00%");
    assert_eq!(builtin.horizontal, HorizontalAlignment::Center);
}

#[test]
fn test_xls_borders_and_fill() {
    let wb = styled_workbook();
    let style = wb.style(StyleId(1)).unwrap();
    assert_eq!(style.borders.left.style, BorderLineStyle::Thin);
    assert_eq!(style.borders.right.style, BorderLineStyle::Medium);
    assert_eq!(style.borders.top.style, BorderLineStyle::MediumDashed);
    assert_eq!(style.borders.bottom.style, BorderLineStyle::Double);
    assert_eq!(style.borders.left.color, Color::Indexed(10));
    assert_eq!(style.borders.top.color, Color::Indexed(64));
    assert_eq!(style.fill.pattern, PatternType::Solid);
    assert_eq!(style.fill.foreground, Color::Indexed(13));
}

#[test]
fn test_xls_palette_override() {
    let wb = styled_workbook();
    assert_eq!(wb.palette().get(8), Some([0x11, 0x22, 0x33]));
    assert_eq!(wb.palette().get(10), Some([255, 0, 0]));
}

#[test]
fn test_xls_unknown_xf_falls_back() {
    let wb = styled_workbook();
    let ws = wb.sheet(0).unwrap();
    assert_eq!(ws.cell_at(0, 2).unwrap().style, None);
    assert_eq!(ws.cell_at(0, 2).unwrap().style_id(), StyleId(0));
}
