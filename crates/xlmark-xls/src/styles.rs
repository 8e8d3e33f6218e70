//! Style records of the workbook globals: FONT, FORMAT, XF and PALETTE.
//!
//! Records are collected while the globals substream is scanned and turned
//! into the workbook font and style tables once it ends, because XF records
//! reference formats that may appear later in the stream.

use std::collections::HashMap;

use xlmark_core::{
    builtin_format, rotation_degrees, BorderEdge, BorderLineStyle, Borders, CellStyle, Color, Fill,
    Font, FontId, HorizontalAlignment, PatternType, VerticalAlignment, Workbook,
};

use crate::biff::strings::{read_short_string, read_unicode_string};
use crate::biff::ByteCursor;
use crate::error::XlsResult;

/// Weight at or above which a font counts as bold
const BOLD_WEIGHT: u16 = 700;

/// First palette slot a PALETTE record overrides
const PALETTE_BASE: u16 = 8;

/// Raw XF record fields still referring to font and format IDs
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct BiffXf {
    pub font_index: u16,
    pub format_id: u16,
    pub horizontal: u8,
    pub vertical: u8,
    pub wrap: bool,
    pub rotation: u8,
    /// Line styles left, right, top, bottom
    pub border_styles: [u8; 4],
    /// Palette indices left, right, top, bottom
    pub border_colors: [u16; 4],
    pub pattern: u8,
    pub fill_fore: u16,
    pub fill_back: u16,
}

/// Style records gathered from the workbook globals
#[derive(Debug, Default)]
pub(crate) struct StyleContext {
    pub fonts: Vec<Font>,
    pub formats: HashMap<u16, String>,
    pub xfs: Vec<BiffXf>,
    pub palette: Vec<(u16, [u8; 3])>,
}

impl StyleContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an XF font reference to a position in the font table.
    ///
    /// BIFF never writes font index 4, so references above it are one past
    /// the record position.
    fn font_id(index: u16) -> FontId {
        let index = if index > 4 { index - 1 } else { index };
        FontId(index as u32)
    }

    fn number_format(&self, id: u16) -> String {
        self.formats
            .get(&id)
            .cloned()
            .or_else(|| builtin_format(id).map(str::to_string))
            .unwrap_or_else(|| "General".to_string())
    }

    fn cell_style(&self, xf: &BiffXf) -> CellStyle {
        let edge = |i: usize| {
            BorderEdge::new(
                BorderLineStyle::from_code(xf.border_styles[i]),
                Color::Indexed(xf.border_colors[i]),
            )
        };

        CellStyle {
            horizontal: HorizontalAlignment::from_code(xf.horizontal),
            vertical: VerticalAlignment::from_code(xf.vertical),
            rotation: rotation_degrees(xf.rotation as u16),
            wrap_text: xf.wrap,
            font: Self::font_id(xf.font_index),
            number_format: self.number_format(xf.format_id),
            borders: Borders {
                left: edge(0),
                right: edge(1),
                top: edge(2),
                bottom: edge(3),
            },
            fill: Fill {
                pattern: PatternType::from_code(xf.pattern),
                foreground: Color::Indexed(xf.fill_fore),
                background: Color::Indexed(xf.fill_back),
            },
        }
    }

    /// Move the collected tables into the workbook
    pub fn install(self, workbook: &mut Workbook) {
        let styles: Vec<CellStyle> = self.xfs.iter().map(|xf| self.cell_style(xf)).collect();
        tracing::debug!(
            fonts = self.fonts.len(),
            formats = self.formats.len(),
            styles = styles.len(),
            "installing BIFF style tables"
        );

        for (index, rgb) in self.palette {
            workbook.palette_mut().set(index, rgb);
        }
        workbook.set_fonts(self.fonts);
        workbook.set_styles(styles);
    }
}

/// FONT: height(2) grbit(2) icv(2) bls(2) sss(2) uls(1) family(1)
/// charset(1) reserved(1) name(short string)
pub(crate) fn parse_font(data: &[u8]) -> XlsResult<Font> {
    let mut cur = ByteCursor::new(data);
    let height = cur.u16()?;
    let grbit = cur.u16()?;
    let color = cur.u16()?;
    let weight = cur.u16()?;
    let _escapement = cur.u16()?;
    let underline = cur.u8()?;
    cur.skip(3);
    let name = read_short_string(&mut cur)?;

    Ok(Font {
        name,
        height,
        bold: weight >= BOLD_WEIGHT,
        italic: grbit & 0x0002 != 0,
        underline: underline != 0,
        strikethrough: grbit & 0x0008 != 0,
        color: Color::Indexed(color),
    })
}

/// FORMAT: ifmt(2) + unicode string
pub(crate) fn parse_format(data: &[u8]) -> XlsResult<(u16, String)> {
    let mut cur = ByteCursor::new(data);
    let id = cur.u16()?;
    let code = read_unicode_string(&mut cur)?;
    Ok((id, code))
}

/// XF: ifnt(2) ifmt(2) type/prot(2) align(1) trot(1) indent(1) used(1)
/// border1(4) border2(4) fill(2)
pub(crate) fn parse_xf(data: &[u8]) -> XlsResult<BiffXf> {
    let mut cur = ByteCursor::new(data);
    let font_index = cur.u16()?;
    let format_id = cur.u16()?;
    let _type_prot = cur.u16()?;
    let align = cur.u8()?;
    let rotation = cur.u8()?;
    cur.skip(2);
    let border1 = cur.u32()?;
    let border2 = cur.u32()?;
    let fill = cur.u16()?;

    Ok(BiffXf {
        font_index,
        format_id,
        horizontal: align & 0x07,
        wrap: align & 0x08 != 0,
        vertical: (align >> 4) & 0x07,
        rotation,
        border_styles: [
            (border1 & 0x0F) as u8,
            ((border1 >> 4) & 0x0F) as u8,
            ((border1 >> 8) & 0x0F) as u8,
            ((border1 >> 12) & 0x0F) as u8,
        ],
        border_colors: [
            ((border1 >> 16) & 0x7F) as u16,
            ((border1 >> 23) & 0x7F) as u16,
            (border2 & 0x7F) as u16,
            ((border2 >> 7) & 0x7F) as u16,
        ],
        pattern: ((border2 >> 26) & 0x3F) as u8,
        fill_fore: fill & 0x7F,
        fill_back: (fill >> 7) & 0x7F,
    })
}

/// PALETTE: count(2) + count × RGBx, overriding slots from index 8 upward
pub(crate) fn parse_palette(data: &[u8]) -> XlsResult<Vec<(u16, [u8; 3])>> {
    let mut cur = ByteCursor::new(data);
    let count = cur.u16()?;
    let mut entries = Vec::with_capacity(count as usize);
    for i in 0..count {
        let Ok(rgbx) = cur.take(4) else {
            tracing::warn!("PALETTE record ends after {i} of {count} entries");
            break;
        };
        entries.push((PALETTE_BASE + i, [rgbx[0], rgbx[1], rgbx[2]]));
    }
    Ok(entries)
}
