//! Cell styling types
//!
//! This module contains the entries of the workbook style and font tables:
//! - [`CellStyle`] - Alignment, rotation, borders, fill and number format
//! - [`Font`] - Font settings
//! - [`Color`] - Color reference in either on-disk scheme
//! - [`Palette`] / [`ThemeColors`] - Tables colors resolve through

mod alignment;
mod border;
mod color;
mod fill;
mod font;
mod number_format;
mod palette;

use std::fmt;

pub use alignment::{rotation_degrees, HorizontalAlignment, VerticalAlignment, ROTATION_STACKED};
pub use border::{BorderEdge, BorderLineStyle, Borders};
pub use color::{apply_tint, tint_channel, Color, AUTOMATIC_INDEX};
pub use fill::{Fill, PatternType};
pub use font::Font;
pub use number_format::builtin_format;
pub use palette::{Palette, ThemeColors, FIRST_CUSTOM_INDEX};

/// Index into the workbook style table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StyleId(pub u32);

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index into the workbook font table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FontId(pub u32);

/// A cell style (one XF record / one `cellXfs` entry)
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyle {
    /// Horizontal alignment
    pub horizontal: HorizontalAlignment,
    /// Vertical alignment
    pub vertical: VerticalAlignment,
    /// Text rotation in degrees (-90..=90, or [`ROTATION_STACKED`])
    pub rotation: i16,
    /// Wrap text
    pub wrap_text: bool,
    /// Font reference
    pub font: FontId,
    /// Number format string
    pub number_format: String,
    /// Border edges
    pub borders: Borders,
    /// Background fill
    pub fill: Fill,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            horizontal: HorizontalAlignment::General,
            vertical: VerticalAlignment::Bottom,
            rotation: 0,
            wrap_text: false,
            font: FontId(0),
            number_format: "General".to_string(),
            borders: Borders::default(),
            fill: Fill::default(),
        }
    }
}

impl CellStyle {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set horizontal alignment
    pub fn with_horizontal(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal = align;
        self
    }

    /// Set vertical alignment
    pub fn with_vertical(mut self, align: VerticalAlignment) -> Self {
        self.vertical = align;
        self
    }

    /// Set rotation angle in degrees
    pub fn with_rotation(mut self, degrees: i16) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set the font reference
    pub fn with_font(mut self, font: FontId) -> Self {
        self.font = font;
        self
    }

    /// Set number format string
    pub fn with_number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = format.into();
        self
    }

    /// Set borders
    pub fn with_borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    /// Set fill
    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    /// Every color the style references, font color excluded
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        [self.fill.foreground, self.fill.background]
            .into_iter()
            .chain(self.borders.edges().into_iter().map(|(_, e)| e.color))
    }
}
