//! Text alignment types

/// Horizontal alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    /// General alignment (text left, numbers right)
    #[default]
    General,
    /// Left aligned
    Left,
    /// Center aligned
    Center,
    /// Right aligned
    Right,
    /// Fill (repeat content to fill cell width)
    Fill,
    /// Justify (stretch to fit width)
    Justify,
    /// Center across selection
    CenterContinuous,
    /// Distributed (like justify, but for East Asian text)
    Distributed,
}

impl HorizontalAlignment {
    /// Alignment for a BIFF `alc` code
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => HorizontalAlignment::Left,
            2 => HorizontalAlignment::Center,
            3 => HorizontalAlignment::Right,
            4 => HorizontalAlignment::Fill,
            5 => HorizontalAlignment::Justify,
            6 => HorizontalAlignment::CenterContinuous,
            7 => HorizontalAlignment::Distributed,
            _ => HorizontalAlignment::General,
        }
    }

    /// Alignment for an OOXML `horizontal` attribute value
    pub fn from_ooxml(name: &str) -> Self {
        match name {
            "left" => HorizontalAlignment::Left,
            "center" => HorizontalAlignment::Center,
            "right" => HorizontalAlignment::Right,
            "fill" => HorizontalAlignment::Fill,
            "justify" => HorizontalAlignment::Justify,
            "centerContinuous" => HorizontalAlignment::CenterContinuous,
            "distributed" => HorizontalAlignment::Distributed,
            _ => HorizontalAlignment::General,
        }
    }
}

/// Vertical alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlignment {
    /// Top aligned
    Top,
    /// Center aligned
    Center,
    /// Bottom aligned (default)
    #[default]
    Bottom,
    /// Justify
    Justify,
    /// Distributed
    Distributed,
}

impl VerticalAlignment {
    /// Alignment for a BIFF `alcV` code
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => VerticalAlignment::Top,
            1 => VerticalAlignment::Center,
            3 => VerticalAlignment::Justify,
            4 => VerticalAlignment::Distributed,
            _ => VerticalAlignment::Bottom,
        }
    }

    /// Alignment for an OOXML `vertical` attribute value
    pub fn from_ooxml(name: &str) -> Self {
        match name {
            "top" => VerticalAlignment::Top,
            "center" => VerticalAlignment::Center,
            "justify" => VerticalAlignment::Justify,
            "distributed" => VerticalAlignment::Distributed,
            _ => VerticalAlignment::Bottom,
        }
    }
}

/// Rotation value marking vertically stacked text
pub const ROTATION_STACKED: i16 = 255;

/// Normalize a stored rotation (BIFF `trot` / OOXML `textRotation`) to degrees
///
/// 0..=90 are counter-clockwise angles, 91..=180 encode -1..=-90 and 255
/// means stacked text. Anything else is treated as no rotation.
pub fn rotation_degrees(raw: u16) -> i16 {
    match raw {
        0..=90 => raw as i16,
        91..=180 => -((raw - 90) as i16),
        255 => ROTATION_STACKED,
        _ => 0,
    }
}
