//! Fill/background style types

use super::Color;

/// Pattern fill of a cell background
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fill {
    /// Pattern type
    pub pattern: PatternType,
    /// Pattern foreground color (the visible color of a solid fill)
    pub foreground: Color,
    /// Pattern background color
    pub background: Color,
}

impl Fill {
    /// Create a solid fill with the given color
    pub fn solid(color: Color) -> Self {
        Self {
            pattern: PatternType::Solid,
            foreground: color,
            background: Color::Auto,
        }
    }

    /// Check if this is a "no fill"
    pub fn is_none(&self) -> bool {
        self.pattern == PatternType::None
    }
}

/// Pattern fill types, in the order of their BIFF fill pattern codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PatternType {
    /// No pattern
    #[default]
    None,
    /// Solid (100% foreground)
    Solid,
    /// 50% gray
    MediumGray,
    /// 75% gray
    DarkGray,
    /// 25% gray
    LightGray,
    /// Horizontal stripe
    DarkHorizontal,
    /// Vertical stripe
    DarkVertical,
    /// Diagonal stripe (down)
    DarkDown,
    /// Diagonal stripe (up)
    DarkUp,
    /// Grid
    DarkGrid,
    /// Trellis
    DarkTrellis,
    /// Thin horizontal stripe
    LightHorizontal,
    /// Thin vertical stripe
    LightVertical,
    /// Thin diagonal stripe (down)
    LightDown,
    /// Thin diagonal stripe (up)
    LightUp,
    /// Thin grid
    LightGrid,
    /// Thin trellis
    LightTrellis,
    /// 12.5% gray
    Gray125,
    /// 6.25% gray
    Gray0625,
}

const PATTERNS: [PatternType; 19] = [
    PatternType::None,
    PatternType::Solid,
    PatternType::MediumGray,
    PatternType::DarkGray,
    PatternType::LightGray,
    PatternType::DarkHorizontal,
    PatternType::DarkVertical,
    PatternType::DarkDown,
    PatternType::DarkUp,
    PatternType::DarkGrid,
    PatternType::DarkTrellis,
    PatternType::LightHorizontal,
    PatternType::LightVertical,
    PatternType::LightDown,
    PatternType::LightUp,
    PatternType::LightGrid,
    PatternType::LightTrellis,
    PatternType::Gray125,
    PatternType::Gray0625,
];

impl PatternType {
    /// Numeric fill pattern code (0 = none, 1 = solid, ...)
    pub fn code(self) -> u8 {
        PATTERNS.iter().position(|p| *p == self).unwrap_or(0) as u8
    }

    /// Pattern for a BIFF fill pattern code; unknown codes map to `None`
    pub fn from_code(code: u8) -> Self {
        PATTERNS.get(code as usize).copied().unwrap_or_default()
    }

    /// Pattern for an OOXML `patternType` attribute value
    pub fn from_ooxml(name: &str) -> Self {
        match name {
            "solid" => PatternType::Solid,
            "mediumGray" => PatternType::MediumGray,
            "darkGray" => PatternType::DarkGray,
            "lightGray" => PatternType::LightGray,
            "darkHorizontal" => PatternType::DarkHorizontal,
            "darkVertical" => PatternType::DarkVertical,
            "darkDown" => PatternType::DarkDown,
            "darkUp" => PatternType::DarkUp,
            "darkGrid" => PatternType::DarkGrid,
            "darkTrellis" => PatternType::DarkTrellis,
            "lightHorizontal" => PatternType::LightHorizontal,
            "lightVertical" => PatternType::LightVertical,
            "lightDown" => PatternType::LightDown,
            "lightUp" => PatternType::LightUp,
            "lightGrid" => PatternType::LightGrid,
            "lightTrellis" => PatternType::LightTrellis,
            "gray125" => PatternType::Gray125,
            "gray0625" => PatternType::Gray0625,
            _ => PatternType::None,
        }
    }
}
