//! Palette-index color scheme (legacy BIFF workbooks)

use xlmark_core::{BorderEdge, CellStyle, Color, StyleId, Workbook, AUTOMATIC_INDEX};

use super::{border_shorthand, hex, style_font, ColorDecl, StyleColors, AUTO_BORDER_COLOR};
use crate::error::{RenderError, RenderResult};

/// Resolves palette indices through the workbook palette
#[derive(Debug, Clone, Copy)]
pub struct IndexedResolver<'wb> {
    workbook: &'wb Workbook,
}

impl<'wb> IndexedResolver<'wb> {
    pub fn new(workbook: &'wb Workbook) -> Self {
        Self { workbook }
    }

    fn index_of(id: StyleId, color: Color) -> RenderResult<u16> {
        match color {
            Color::Auto => Ok(AUTOMATIC_INDEX),
            Color::Indexed(index) => Ok(index),
            other => Err(RenderError::UnsupportedStyle {
                index: id,
                detail: format!("{other} in a palette-indexed workbook"),
            }),
        }
    }

    fn decl(&self, id: StyleId, color: Color) -> RenderResult<ColorDecl> {
        let index = Self::index_of(id, color)?;
        let rgb = (index != AUTOMATIC_INDEX)
            .then(|| self.workbook.palette().get(index))
            .flatten();
        Ok(match rgb {
            Some(rgb) => ColorDecl::Rgb {
                rgb,
                alpha: None,
                index: Some(index),
            },
            None => ColorDecl::Omitted {
                note: Some(format!("index = {index}")),
            },
        })
    }

    pub fn colors_for(&self, id: StyleId, style: &CellStyle) -> RenderResult<StyleColors> {
        let font = style_font(self.workbook, style)?;
        let b = &style.borders;

        Ok(StyleColors {
            fill_pattern: Some(style.fill.pattern.code()),
            background: self.decl(id, style.fill.foreground)?,
            font: self.decl(id, font.color)?,
            borders: [
                self.decl(id, b.left.color)?,
                self.decl(id, b.right.color)?,
                self.decl(id, b.top.color)?,
                self.decl(id, b.bottom.color)?,
            ],
        })
    }

    pub fn border_appearance(&self, id: StyleId, edge: &BorderEdge) -> RenderResult<String> {
        let index = Self::index_of(id, edge.color)?;
        let color = (index != AUTOMATIC_INDEX)
            .then(|| self.workbook.palette().get(index))
            .flatten()
            .map_or_else(|| AUTO_BORDER_COLOR.to_string(), hex);
        Ok(border_shorthand(edge.style, &color))
    }
}
