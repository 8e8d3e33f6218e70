//! ARGB/theme color scheme (OOXML workbooks)

use xlmark_core::{apply_tint, BorderEdge, CellStyle, Color, StyleId, Workbook, AUTOMATIC_INDEX};

use super::{border_shorthand, hex, style_font, ColorDecl, StyleColors, AUTO_BORDER_COLOR};
use crate::error::RenderResult;

/// Resolves ARGB and theme colors, applying their tint
#[derive(Debug, Clone, Copy)]
pub struct DirectResolver<'wb> {
    workbook: &'wb Workbook,
}

impl<'wb> DirectResolver<'wb> {
    pub fn new(workbook: &'wb Workbook) -> Self {
        Self { workbook }
    }

    /// Stored RGB before tint, plus the alpha byte of ARGB colors
    fn base(&self, color: Color) -> Option<([u8; 3], Option<u8>)> {
        match color {
            Color::Auto => None,
            Color::Argb { a, r, g, b, .. } => Some(([r, g, b], Some(a))),
            Color::Theme { index, .. } => {
                let rgb = self.workbook.theme().get(index);
                if rgb.is_none() {
                    tracing::debug!(index, "theme color slot out of range");
                }
                rgb.map(|rgb| (rgb, None))
            }
            Color::Indexed(AUTOMATIC_INDEX) => None,
            Color::Indexed(index) => self.workbook.palette().get(index).map(|rgb| (rgb, None)),
        }
    }

    /// RGB with tint applied, plus the alpha byte of ARGB colors
    fn resolve(&self, color: Color) -> Option<([u8; 3], Option<u8>)> {
        self.base(color)
            .map(|(rgb, alpha)| (apply_tint(rgb, color.tint()), alpha))
    }

    fn decl(&self, color: Color) -> ColorDecl {
        match self.resolve(color) {
            Some((rgb, alpha)) => ColorDecl::Rgb {
                rgb,
                alpha,
                index: None,
            },
            None => ColorDecl::omitted(),
        }
    }

    pub fn colors_for(&self, _id: StyleId, style: &CellStyle) -> RenderResult<StyleColors> {
        let font = style_font(self.workbook, style)?;
        Ok(StyleColors {
            fill_pattern: None,
            background: self.decl(style.fill.foreground),
            font: self.decl(font.color),
            // edge colors are part of the border shorthand
            borders: [
                ColorDecl::omitted(),
                ColorDecl::omitted(),
                ColorDecl::omitted(),
                ColorDecl::omitted(),
            ],
        })
    }

    /// Border shorthand; edge colors use the stored RGB, ignoring tint
    pub fn border_appearance(&self, _id: StyleId, edge: &BorderEdge) -> RenderResult<String> {
        let color = self
            .base(edge.color)
            .map_or_else(|| AUTO_BORDER_COLOR.to_string(), |(rgb, _)| hex(rgb));
        Ok(border_shorthand(edge.style, &color))
    }
}
