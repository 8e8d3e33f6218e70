//! Color representation

use std::fmt;

/// Palette index meaning "automatic color"
pub const AUTOMATIC_INDEX: u16 = 64;

/// A color as stored in a style
///
/// The variants mirror the two on-disk schemes: legacy workbooks reference a
/// palette slot, OOXML workbooks carry ARGB bytes or a theme slot, both with
/// an optional tint.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Color {
    /// Automatic/default color
    #[default]
    Auto,

    /// Index into the workbook palette
    Indexed(u16),

    /// Explicit ARGB color with a tint in -1.0..=1.0
    Argb {
        a: u8,
        r: u8,
        g: u8,
        b: u8,
        tint: f64,
    },

    /// Theme slot with a tint in -1.0..=1.0
    ///
    /// Theme indices:
    /// 0 = Background 1 (light)
    /// 1 = Text 1 (dark)
    /// 2 = Background 2
    /// 3 = Text 2
    /// 4-9 = Accent 1-6
    /// 10-11 = Hyperlink, followed hyperlink
    Theme {
        /// Theme color index (0-11)
        index: u8,
        /// Tint value
        tint: f64,
    },
}

impl Color {
    /// Create an opaque RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Argb {
            a: 0xFF,
            r,
            g,
            b,
            tint: 0.0,
        }
    }

    /// Create a theme color
    pub const fn theme(index: u8, tint: f64) -> Self {
        Color::Theme { index, tint }
    }

    /// Create from a hex string ("RRGGBB" or "AARRGGBB", optional `#`)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();

        match hex.len() {
            6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color::Argb {
                a: byte(0)?,
                r: byte(2)?,
                g: byte(4)?,
                b: byte(6)?,
                tint: 0.0,
            }),
            _ => None,
        }
    }

    /// Replace the tint of an ARGB or theme color; other variants are returned unchanged
    pub fn with_tint(self, tint: f64) -> Self {
        match self {
            Color::Argb { a, r, g, b, .. } => Color::Argb { a, r, g, b, tint },
            Color::Theme { index, .. } => Color::Theme { index, tint },
            other => other,
        }
    }

    /// Check if color is automatic/default
    pub fn is_auto(&self) -> bool {
        matches!(self, Color::Auto) || matches!(self, Color::Indexed(i) if *i == AUTOMATIC_INDEX)
    }

    /// The tint carried by the color (0.0 for untinted variants)
    pub fn tint(&self) -> f64 {
        match self {
            Color::Argb { tint, .. } | Color::Theme { tint, .. } => *tint,
            _ => 0.0,
        }
    }
}

/// Lighten (positive tint) or darken (negative tint) one channel
pub fn tint_channel(channel: u8, tint: f64) -> u8 {
    let c = channel as f64;
    let result = if tint < 0.0 {
        c * (1.0 + tint)
    } else {
        c + (255.0 - c) * tint
    };
    result.round().clamp(0.0, 255.0) as u8
}

/// Apply a tint to an RGB triplet
pub fn apply_tint(rgb: [u8; 3], tint: f64) -> [u8; 3] {
    if tint == 0.0 {
        return rgb;
    }
    [
        tint_channel(rgb[0], tint),
        tint_channel(rgb[1], tint),
        tint_channel(rgb[2], tint),
    ]
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Auto => write!(f, "auto"),
            Color::Indexed(i) => write!(f, "indexed({i})"),
            Color::Argb { a, r, g, b, tint } if *tint == 0.0 => {
                write!(f, "#{a:02X}{r:02X}{g:02X}{b:02X}")
            }
            Color::Argb { a, r, g, b, tint } => {
                write!(f, "#{a:02X}{r:02X}{g:02X}{b:02X} tint {tint}")
            }
            Color::Theme { index, tint } => write!(f, "theme({index}, {tint})"),
        }
    }
}
