//! Border style types

use super::Color;

/// The four rendered border edges of a cell
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Borders {
    /// Left border
    pub left: BorderEdge,
    /// Right border
    pub right: BorderEdge,
    /// Top border
    pub top: BorderEdge,
    /// Bottom border
    pub bottom: BorderEdge,
}

impl Borders {
    /// All four edges with the same style and color
    pub fn all(style: BorderLineStyle, color: Color) -> Self {
        let edge = BorderEdge::new(style, color);
        Self {
            left: edge,
            right: edge,
            top: edge,
            bottom: edge,
        }
    }

    /// Edges in rendering order, paired with their CSS side name
    pub fn edges(&self) -> [(&'static str, &BorderEdge); 4] {
        [
            ("left", &self.left),
            ("right", &self.right),
            ("top", &self.top),
            ("bottom", &self.bottom),
        ]
    }
}

/// A single border edge
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderEdge {
    /// Line style
    pub style: BorderLineStyle,
    /// Line color
    pub color: Color,
}

impl BorderEdge {
    /// Create a new border edge
    pub fn new(style: BorderLineStyle, color: Color) -> Self {
        Self { style, color }
    }
}

/// Border line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderLineStyle {
    /// No border
    #[default]
    None,
    /// Thin line
    Thin,
    /// Medium line
    Medium,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
    /// Thick line
    Thick,
    /// Double line
    Double,
    /// Hair line (very thin)
    Hair,
    /// Medium dashed
    MediumDashed,
    /// Dash-dot
    DashDot,
    /// Medium dash-dot
    MediumDashDot,
    /// Dash-dot-dot
    DashDotDot,
    /// Medium dash-dot-dot
    MediumDashDotDot,
    /// Slant dash-dot
    SlantDashDot,
}

impl BorderLineStyle {
    /// Line style for a BIFF border code (the variant order above)
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => BorderLineStyle::Thin,
            2 => BorderLineStyle::Medium,
            3 => BorderLineStyle::Dashed,
            4 => BorderLineStyle::Dotted,
            5 => BorderLineStyle::Thick,
            6 => BorderLineStyle::Double,
            7 => BorderLineStyle::Hair,
            8 => BorderLineStyle::MediumDashed,
            9 => BorderLineStyle::DashDot,
            10 => BorderLineStyle::MediumDashDot,
            11 => BorderLineStyle::DashDotDot,
            12 => BorderLineStyle::MediumDashDotDot,
            13 => BorderLineStyle::SlantDashDot,
            _ => BorderLineStyle::None,
        }
    }

    /// Line style for an OOXML `style` attribute value
    pub fn from_ooxml(name: &str) -> Self {
        match name {
            "thin" => BorderLineStyle::Thin,
            "medium" => BorderLineStyle::Medium,
            "dashed" => BorderLineStyle::Dashed,
            "dotted" => BorderLineStyle::Dotted,
            "thick" => BorderLineStyle::Thick,
            "double" => BorderLineStyle::Double,
            "hair" => BorderLineStyle::Hair,
            "mediumDashed" => BorderLineStyle::MediumDashed,
            "dashDot" => BorderLineStyle::DashDot,
            "mediumDashDot" => BorderLineStyle::MediumDashDot,
            "dashDotDot" => BorderLineStyle::DashDotDot,
            "mediumDashDotDot" => BorderLineStyle::MediumDashDotDot,
            "slantDashDot" => BorderLineStyle::SlantDashDot,
            _ => BorderLineStyle::None,
        }
    }
}
