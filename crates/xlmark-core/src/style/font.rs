//! Font type

use super::Color;

/// An entry of the workbook font table
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Font family name (e.g., "Calibri", "Arial"); may be empty
    pub name: String,
    /// Height in twentieths of a point (BIFF unit)
    pub height: u16,
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Underline
    pub underline: bool,
    /// Strikethrough
    pub strikethrough: bool,
    /// Font color
    pub color: Color,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            name: "Calibri".to_string(),
            height: 220,
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            color: Color::Auto,
        }
    }
}

impl Font {
    /// Create a new default font
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Set font size in points
    pub fn with_points(mut self, points: f64) -> Self {
        self.height = (points * 20.0).round().clamp(0.0, u16::MAX as f64) as u16;
        self
    }

    /// Set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set italic
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Height in whole points, truncating fractional sizes
    pub fn height_in_points(&self) -> u16 {
        self.height / 20
    }
}
