//! Stylesheet emission
//!
//! The `<style>` block holds the base stylesheet followed by one rule per
//! style index used by any cell of the workbook. Rules are scoped under the
//! table's [`DEFAULTS_CLASS`] and named by [`style_class`].

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use ahash::AHashSet;
use xlmark_core::{HorizontalAlignment, StyleId, VerticalAlignment, Workbook};

use crate::error::{RenderError, RenderResult};
use crate::resolver::{style_font, StyleResolver};

/// The built-in base stylesheet
pub const EXCEL_STYLE_CSS: &str = include_str!("../assets/excel_style.css");

/// Class of the rendered `<table>`
pub const DEFAULTS_CLASS: &str = "excelDefaults";

/// Class of the column heading row and cells
pub const COL_HEAD_CLASS: &str = "colHeader";

/// Class name of a style rule: `style_` and the index, at least two digits
pub fn style_class(id: StyleId) -> String {
    format!("style_{:02}", id.0)
}

fn text_align(align: HorizontalAlignment) -> Option<&'static str> {
    match align {
        HorizontalAlignment::Left | HorizontalAlignment::Justify => Some("left"),
        HorizontalAlignment::Center => Some("center"),
        HorizontalAlignment::Right => Some("right"),
        _ => None,
    }
}

fn vertical_align(align: VerticalAlignment) -> Option<&'static str> {
    match align {
        VerticalAlignment::Bottom => Some("bottom"),
        VerticalAlignment::Center => Some("middle"),
        VerticalAlignment::Top => Some("top"),
        _ => None,
    }
}

/// Load the base stylesheet: the file at `path`, or the built-in one
pub fn load_base_stylesheet(path: Option<&Path>) -> RenderResult<Cow<'static, str>> {
    match path {
        None => Ok(Cow::Borrowed(EXCEL_STYLE_CSS)),
        Some(path) => std::fs::read_to_string(path)
            .map(Cow::Owned)
            .map_err(|source| RenderError::MissingStylesheet {
                path: path.to_path_buf(),
                source,
            }),
    }
}

/// Style indices used by the cells of every sheet, in first-seen order
pub fn used_styles(workbook: &Workbook) -> Vec<StyleId> {
    let mut seen = AHashSet::new();
    workbook
        .sheets()
        .flat_map(|sheet| sheet.iter_cells())
        .map(|(_, cell)| cell.style_id())
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Write the rule block of one style
pub fn write_rule<W: Write + ?Sized>(
    workbook: &Workbook,
    resolver: &StyleResolver<'_>,
    id: StyleId,
    out: &mut W,
) -> RenderResult<()> {
    let style = workbook.style(id)?;
    writeln!(out, ".{DEFAULTS_CLASS} .{} {{", style_class(id))?;

    if let Some(align) = text_align(style.horizontal) {
        writeln!(out, "  text-align: {align};")?;
    }
    if let Some(align) = vertical_align(style.vertical) {
        writeln!(out, "  vertical-align: {align};")?;
    }

    let font = style_font(workbook, style)?;
    if font.bold {
        writeln!(out, "  font-weight: bold;")?;
    }
    if font.italic {
        writeln!(out, "  font-style: italic;")?;
    }
    let size = match font.height_in_points() {
        9 => 10,
        points => points,
    };
    writeln!(out, "  font-size: {size}pt;")?;
    if !font.name.is_empty() {
        writeln!(out, "  font-family: {};", font.name)?;
    }

    resolver.write_borders(id, style, out)?;
    resolver.write_colors(id, style, out)?;
    writeln!(out, "}}")?;
    Ok(())
}

/// Write the base stylesheet and one rule per used style, returning the
/// number of rules
pub fn emit_stylesheet<W: Write + ?Sized>(
    workbook: &Workbook,
    resolver: &StyleResolver<'_>,
    base: &str,
    out: &mut W,
) -> RenderResult<usize> {
    for line in base.lines() {
        writeln!(out, "{line}")?;
    }

    let styles = used_styles(workbook);
    for id in &styles {
        write_rule(workbook, resolver, *id, out)?;
    }
    tracing::debug!(rules = styles.len(), "emitted style rules");
    Ok(styles.len())
}
