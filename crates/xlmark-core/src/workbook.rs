//! Workbook type - the main document structure

use crate::error::{Error, Result};
use crate::style::{CellStyle, Font, FontId, Palette, StyleId, ThemeColors};
use crate::worksheet::Worksheet;

/// How the workbook's styles encode colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorModel {
    /// Legacy BIFF: colors are indices into the workbook palette
    Indexed,
    /// OOXML: colors carry ARGB bytes or theme slots, with tint
    Direct,
}

/// A workbook snapshot: sheets plus the shared font and style tables
///
/// Cells reference styles and styles reference fonts by index. The tables
/// always hold at least one entry, so index 0 resolves in every workbook.
#[derive(Debug, Clone)]
pub struct Workbook {
    color_model: ColorModel,
    sheets: Vec<Worksheet>,
    fonts: Vec<Font>,
    styles: Vec<CellStyle>,
    palette: Palette,
    theme: ThemeColors,
    date1904: bool,
}

impl Workbook {
    /// Create an empty workbook with a default font and style
    pub fn new(color_model: ColorModel) -> Self {
        Self {
            color_model,
            sheets: Vec::new(),
            fonts: vec![Font::default()],
            styles: vec![CellStyle::default()],
            palette: Palette::default(),
            theme: ThemeColors::default(),
            date1904: false,
        }
    }

    /// The color encoding used by every style of this workbook
    pub fn color_model(&self) -> ColorModel {
        self.color_model
    }

    // === Sheets ===

    /// Append a worksheet, returning its index
    pub fn push_sheet(&mut self, sheet: Worksheet) -> usize {
        self.sheets.push(sheet);
        self.sheets.len() - 1
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get a worksheet by index
    pub fn sheet(&self, index: usize) -> Result<&Worksheet> {
        self.sheets
            .get(index)
            .ok_or(Error::SheetOutOfBounds(index, self.sheets.len()))
    }

    /// Get a mutable worksheet by index
    pub fn sheet_mut(&mut self, index: usize) -> Result<&mut Worksheet> {
        let count = self.sheets.len();
        self.sheets
            .get_mut(index)
            .ok_or(Error::SheetOutOfBounds(index, count))
    }

    /// Iterate over all worksheets
    pub fn sheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.sheets.iter()
    }

    // === Fonts and styles ===

    /// Replace the font table; an empty table keeps the default font
    pub fn set_fonts(&mut self, fonts: Vec<Font>) {
        if !fonts.is_empty() {
            self.fonts = fonts;
        }
    }

    /// Append a font, returning its index
    pub fn push_font(&mut self, font: Font) -> FontId {
        self.fonts.push(font);
        FontId((self.fonts.len() - 1) as u32)
    }

    /// Replace the style table; an empty table keeps the default style
    pub fn set_styles(&mut self, styles: Vec<CellStyle>) {
        if !styles.is_empty() {
            self.styles = styles;
        }
    }

    /// Append a style, returning its index
    pub fn push_style(&mut self, style: CellStyle) -> StyleId {
        self.styles.push(style);
        StyleId((self.styles.len() - 1) as u32)
    }

    /// Look up a style
    pub fn style(&self, id: StyleId) -> Result<&CellStyle> {
        self.styles
            .get(id.0 as usize)
            .ok_or(Error::InvalidStyleIndex(id.0))
    }

    /// Look up a font
    pub fn font(&self, id: FontId) -> Result<&Font> {
        self.fonts
            .get(id.0 as usize)
            .ok_or(Error::InvalidFontIndex(id.0))
    }

    /// The style table
    pub fn styles(&self) -> &[CellStyle] {
        &self.styles
    }

    /// The font table
    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    // === Color tables and settings ===

    /// The indexed color palette
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Mutable access to the palette (BIFF PALETTE records override entries)
    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    /// Theme colors
    pub fn theme(&self) -> &ThemeColors {
        &self.theme
    }

    /// Replace the theme colors
    pub fn set_theme(&mut self, theme: ThemeColors) {
        self.theme = theme;
    }

    /// Whether date serials count from 1904-01-01 instead of 1899-12-30
    pub fn date1904(&self) -> bool {
        self.date1904
    }

    /// Set the date system
    pub fn set_date1904(&mut self, date1904: bool) {
        self.date1904 = date1904;
    }
}
