//! Grid layout: the `<table>` of one worksheet
//!
//! Every existing row becomes a `<tr>` holding one `<td>` per column of the
//! sheet's occupied column range. Merged regions collapse into a single
//! spanning cell, and a frozen header split moves the top rows into
//! `<thead>`.

use std::io::Write;
use std::ops::Range;

use xlmark_core::{
    Cell, CellAddress, HorizontalAlignment, Row, StyleId, Workbook, Worksheet,
};

use crate::content::{self, NBSP};
use crate::css::{style_class, COL_HEAD_CLASS, DEFAULTS_CLASS};
use crate::error::RenderResult;

/// Rotation rendered with the vertical `<div><span>` wrapper
const VERTICAL_ROTATION: i16 = 90;

/// The occupied column range of a sheet, computed once per render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnBounds {
    /// First occupied column
    pub first: u16,
    /// One past the last occupied column
    pub end: u16,
}

impl ColumnBounds {
    /// Smallest first cell and largest exclusive last cell over all rows;
    /// `0..0` when no row holds a cell
    pub fn of(sheet: &Worksheet) -> Self {
        let mut bounds: Option<Self> = None;
        for row in sheet.rows() {
            let (Some(first), Some(end)) = (row.first_cell_num(), row.last_cell_num()) else {
                continue;
            };
            bounds = Some(match bounds {
                Some(b) => Self {
                    first: b.first.min(first),
                    end: b.end.max(end),
                },
                None => Self { first, end },
            });
        }
        bounds.unwrap_or(Self { first: 0, end: 0 })
    }

    pub fn columns(&self) -> Range<u16> {
        self.first..self.end
    }

    pub fn len(&self) -> usize {
        self.columns().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Inline alignment attribute of a present cell
fn inline_align(align: HorizontalAlignment) -> &'static str {
    match align {
        HorizontalAlignment::Right => "style=\"text-align: right;\"",
        HorizontalAlignment::Center | HorizontalAlignment::CenterContinuous => {
            "style=\"text-align: center;\""
        }
        _ => "style=\"text-align: left;\"",
    }
}

/// The cell at `col`, if the column lies inside the row's own cell range
fn present_cell(row: &Row, col: u16) -> Option<&Cell> {
    let first = row.first_cell_num()?;
    let end = row.last_cell_num()?;
    (first..end).contains(&col).then(|| row.cell(col)).flatten()
}

/// The table section rows are currently written into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Head,
    Body,
}

impl Section {
    fn open_tag(self) -> &'static str {
        match self {
            Section::Head => "<thead>",
            Section::Body => "<tbody>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            Section::Head => "</thead>",
            Section::Body => "</tbody>",
        }
    }

    /// Close the header, if open, and continue in the body
    fn enter_body<W: Write + ?Sized>(self, out: &mut W) -> RenderResult<Section> {
        if self == Section::Head {
            writeln!(out, "{}", Section::Head.close_tag())?;
            writeln!(out, "{}", Section::Body.open_tag())?;
        }
        Ok(Section::Body)
    }
}

/// Renders one worksheet as a `<table>`
pub struct SheetRenderer<'a> {
    workbook: &'a Workbook,
    sheet: &'a Worksheet,
    bounds: ColumnBounds,
    column_headings: bool,
}

impl<'a> SheetRenderer<'a> {
    pub fn new(workbook: &'a Workbook, sheet: &'a Worksheet) -> Self {
        Self {
            workbook,
            sheet,
            bounds: ColumnBounds::of(sheet),
            column_headings: false,
        }
    }

    /// Render a lettered heading row before the sheet content
    pub fn with_column_headings(mut self, headings: bool) -> Self {
        self.column_headings = headings;
        self
    }

    pub fn bounds(&self) -> ColumnBounds {
        self.bounds
    }

    /// Write the complete `<table>`
    pub fn render<W: Write + ?Sized>(&self, out: &mut W) -> RenderResult<()> {
        writeln!(out, "<table class={DEFAULTS_CLASS}>")?;
        self.write_cols(out)?;
        self.write_content(out)?;
        writeln!(out, "</table>")?;
        Ok(())
    }

    fn write_cols<W: Write + ?Sized>(&self, out: &mut W) -> RenderResult<()> {
        // gutter
        writeln!(out, "<col/>")?;
        for _ in self.bounds.columns() {
            writeln!(out, "<col/>")?;
        }
        Ok(())
    }

    fn write_column_headings<W: Write + ?Sized>(&self, out: &mut W) -> RenderResult<()> {
        writeln!(out, "  <tr class={COL_HEAD_CLASS}>")?;
        writeln!(out, "    <th class={COL_HEAD_CLASS}>&#x25CA;</th>")?;
        for col in self.bounds.columns() {
            writeln!(
                out,
                "    <th class={COL_HEAD_CLASS}>{}</th>",
                CellAddress::column_to_letters(col)
            )?;
        }
        writeln!(out, "  </tr>")?;
        Ok(())
    }

    /// Write the heading row and sheet rows inside `<thead>`/`<tbody>`.
    ///
    /// Rows are sparse, so the header closes either after row `split - 1` or
    /// before the first stored row at or past the split, whichever comes
    /// first. The section still open at the end is closed.
    fn write_content<W: Write + ?Sized>(&self, out: &mut W) -> RenderResult<()> {
        let split = self.sheet.pane().and_then(|pane| pane.header_split_row());

        let mut section = if self.column_headings || split.is_some() {
            Section::Head
        } else {
            Section::Body
        };
        writeln!(out, "{}", section.open_tag())?;

        if self.column_headings {
            self.write_column_headings(out)?;
            if split.is_none() {
                section = section.enter_body(out)?;
            }
        }

        for row in self.sheet.rows() {
            if split.is_some_and(|split| row.index >= split) {
                section = section.enter_body(out)?;
            }

            writeln!(out, "  <tr>")?;
            self.write_row(row, out)?;
            writeln!(out, "  </tr>")?;

            if split.is_some_and(|split| row.index + 1 == split) {
                section = section.enter_body(out)?;
            }
        }

        writeln!(out, "{}", section.close_tag())?;
        Ok(())
    }

    fn write_row<W: Write + ?Sized>(&self, row: &Row, out: &mut W) -> RenderResult<()> {
        let mut col = self.bounds.first;
        while col < self.bounds.end {
            let merged = self.sheet.merged_region_at(row.index, col);

            let mut spans = String::new();
            if let Some(region) = merged {
                if region.extra_cols() > 0 {
                    spans.push_str(&format!(" colspan=\"{}\"", region.extra_cols() + 1));
                }
                if region.extra_rows() > 0 {
                    if row.index != region.start.row {
                        // covered by the rowspan of an earlier row
                        col += 1;
                        continue;
                    }
                    spans.push_str(&format!(" rowspan=\"{}\"", region.extra_rows() + 1));
                }
            }

            match present_cell(row, col) {
                Some(cell) => self.write_cell(cell, &spans, out)?,
                None => writeln!(
                    out,
                    "    <td class={}  {spans}>{NBSP}</td>",
                    style_class(StyleId(0))
                )?,
            }

            let skip = merged.map_or(0, |region| region.extra_cols());
            col = col.saturating_add(1).saturating_add(skip);
        }
        Ok(())
    }

    fn write_cell<W: Write + ?Sized>(&self, cell: &Cell, spans: &str, out: &mut W) -> RenderResult<()> {
        let id = cell.style_id();
        let style = self.workbook.style(id)?;
        let attrs = inline_align(style.horizontal);
        let text = content::text_for(cell, style, self.workbook.date1904());

        if style.rotation == VERTICAL_ROTATION {
            writeln!(
                out,
                "    <td class=\"{} rotate\" {attrs} {spans}><div><span>{text}</span></div></td>",
                style_class(id)
            )?;
        } else {
            writeln!(out, "    <td class={} {attrs} {spans}>{text}</td>", style_class(id))?;
        }
        Ok(())
    }
}
