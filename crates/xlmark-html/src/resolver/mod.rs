//! Style color and border resolution
//!
//! Workbooks encode colors in one of two schemes, picked by
//! [`ColorModel`]. The resolver for the workbook's scheme turns the colors of
//! a [`CellStyle`] into CSS declarations:
//! - [`IndexedResolver`] looks palette indices up and annotates every
//!   declaration with the index it came from
//! - [`DirectResolver`] applies tints to ARGB and theme colors and emits an
//!   extra `rgba(...)` declaration for translucent colors
//!
//! A color outside the resolver's scheme is an error, never a silent
//! fallback.

mod direct;
mod indexed;

use std::io::Write;

use xlmark_core::{
    BorderEdge, BorderLineStyle, CellStyle, ColorModel, Font, FontId, StyleId, Workbook,
};

use crate::error::RenderResult;

pub use direct::DirectResolver;
pub use indexed::IndexedResolver;

/// Border color used when the edge color is automatic or unresolvable
pub const AUTO_BORDER_COLOR: &str = "#000";

/// CSS border shorthand for a line style drawn in `color`
pub fn border_shorthand(style: BorderLineStyle, color: &str) -> String {
    use BorderLineStyle::*;

    match style {
        None => "none".to_string(),
        DashDot | DashDotDot | Dashed => format!("{color} dashed 1pt"),
        Dotted => format!("{color} dotted 1pt"),
        Double => format!("{color} double 3pt"),
        Hair => format!("{color} solid 1px"),
        Medium => format!("{color} solid 2pt"),
        MediumDashDot | MediumDashDotDot | MediumDashed | SlantDashDot => {
            format!("{color} dashed 2pt")
        }
        Thick => format!("{color} solid 3pt"),
        Thin => format!("{color} solid 1pt"),
    }
}

/// The font of a style, falling back to font 0 for a dangling reference
pub(crate) fn style_font<'wb>(
    workbook: &'wb Workbook,
    style: &CellStyle,
) -> RenderResult<&'wb Font> {
    match workbook.font(style.font) {
        Ok(font) => Ok(font),
        Err(_) => {
            tracing::warn!(font = style.font.0, "style references a missing font, using font 0");
            Ok(workbook.font(FontId(0))?)
        }
    }
}

/// Lowercase `#rrggbb`
pub fn hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// One resolved color declaration
#[derive(Debug, Clone, PartialEq)]
pub enum ColorDecl {
    /// A concrete color
    Rgb {
        rgb: [u8; 3],
        /// Alpha byte when the source color carries one
        alpha: Option<u8>,
        /// Palette index the color was looked up from
        index: Option<u16>,
    },
    /// No declaration, optionally replaced by a diagnostic comment
    Omitted { note: Option<String> },
}

impl ColorDecl {
    /// An omitted declaration without a comment
    pub const fn omitted() -> Self {
        ColorDecl::Omitted { note: None }
    }

    /// `#rrggbb` of a concrete color
    pub fn hex(&self) -> Option<String> {
        match self {
            ColorDecl::Rgb { rgb, .. } => Some(hex(*rgb)),
            ColorDecl::Omitted { .. } => None,
        }
    }

    fn write<W: Write + ?Sized>(&self, attr: &str, out: &mut W) -> std::io::Result<()> {
        match self {
            ColorDecl::Rgb { rgb, alpha, index } => {
                write!(out, "  {attr}: {};", hex(*rgb))?;
                if let Some(index) = index {
                    write!(out, " /* index = {index} */")?;
                }
                writeln!(out)?;
                // 0x00 alpha means "unspecified" in practice, 0xFF is opaque
                if let Some(a) = alpha.filter(|a| *a != 0 && *a != 0xFF) {
                    writeln!(
                        out,
                        "  {attr}: rgba({}, {}, {}, {:.2});",
                        rgb[0],
                        rgb[1],
                        rgb[2],
                        f64::from(a) / 255.0
                    )?;
                }
                Ok(())
            }
            ColorDecl::Omitted { note: Some(note) } => writeln!(out, "  /* {attr}: {note} */"),
            ColorDecl::Omitted { note: None } => Ok(()),
        }
    }
}

/// The color declarations of one style rule
#[derive(Debug, Clone, PartialEq)]
pub struct StyleColors {
    /// Fill pattern code, written as a leading comment
    pub fill_pattern: Option<u8>,
    pub background: ColorDecl,
    pub font: ColorDecl,
    /// Left, right, top, bottom
    pub borders: [ColorDecl; 4],
}

impl StyleColors {
    /// Write the declarations in rule order
    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        if let Some(pattern) = self.fill_pattern {
            writeln!(out, "  /* fill pattern = {pattern} */")?;
        }
        self.background.write("background-color", out)?;
        self.font.write("color", out)?;
        for (side, decl) in ["left", "right", "top", "bottom"].iter().zip(&self.borders) {
            decl.write(&format!("border-{side}-color"), out)?;
        }
        Ok(())
    }
}

/// Resolver for the color scheme of one workbook
#[derive(Debug, Clone, Copy)]
pub enum StyleResolver<'wb> {
    Indexed(IndexedResolver<'wb>),
    Direct(DirectResolver<'wb>),
}

impl<'wb> StyleResolver<'wb> {
    /// Pick the resolver matching the workbook's color model
    pub fn for_workbook(workbook: &'wb Workbook) -> Self {
        match workbook.color_model() {
            ColorModel::Indexed => StyleResolver::Indexed(IndexedResolver::new(workbook)),
            ColorModel::Direct => StyleResolver::Direct(DirectResolver::new(workbook)),
        }
    }

    /// Color declarations for a style
    pub fn colors_for(&self, id: StyleId, style: &CellStyle) -> RenderResult<StyleColors> {
        match self {
            StyleResolver::Indexed(r) => r.colors_for(id, style),
            StyleResolver::Direct(r) => r.colors_for(id, style),
        }
    }

    /// CSS border shorthand for one edge
    pub fn border_appearance(&self, id: StyleId, edge: &BorderEdge) -> RenderResult<String> {
        match self {
            StyleResolver::Indexed(r) => r.border_appearance(id, edge),
            StyleResolver::Direct(r) => r.border_appearance(id, edge),
        }
    }

    /// Write the four `border-*` declarations of a style
    pub fn write_borders<W: Write + ?Sized>(
        &self,
        id: StyleId,
        style: &CellStyle,
        out: &mut W,
    ) -> RenderResult<()> {
        for (side, edge) in style.borders.edges() {
            let shorthand = self.border_appearance(id, edge)?;
            writeln!(out, "  border-{side}: {shorthand};")?;
        }
        Ok(())
    }

    /// Write the color declarations of a style
    pub fn write_colors<W: Write + ?Sized>(
        &self,
        id: StyleId,
        style: &CellStyle,
        out: &mut W,
    ) -> RenderResult<()> {
        self.colors_for(id, style)?.write(out)?;
        Ok(())
    }
}
