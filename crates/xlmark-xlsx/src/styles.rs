//! `xl/styles.xml` parsing.
//!
//! Only the parts that feed cell rendering are read: number formats, fonts,
//! pattern fills, borders and the `cellXfs` table. Cell `s` attributes index
//! `cellXfs` directly, so its entries become the workbook style table in
//! document order.

use std::collections::HashMap;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use xlmark_core::{
    builtin_format, rotation_degrees, BorderEdge, BorderLineStyle, Borders, CellStyle, Color, Fill,
    Font, FontId, HorizontalAlignment, PatternType, VerticalAlignment, Workbook,
};

use crate::error::{XlsxError, XlsxResult};
use crate::xml::{attr, attr_bool, attr_parse, toggle};

/// The section of the stylesheet the parser is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Other,
    NumFmts,
    Fonts,
    Fills,
    Borders,
    CellXfs,
    IndexedColors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Left,
    Right,
    Top,
    Bottom,
    Diagonal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FillColor {
    Foreground,
    Background,
}

/// A `cellXfs/xf` entry before its references are resolved
#[derive(Debug, Clone, Default)]
struct RawXf {
    num_fmt_id: u16,
    font_id: usize,
    fill_id: usize,
    border_id: usize,
    horizontal: HorizontalAlignment,
    vertical: VerticalAlignment,
    wrap_text: bool,
    rotation: i16,
}

/// Fonts and resolved cell styles of a stylesheet
#[derive(Debug, Default)]
pub(crate) struct StyleTables {
    pub fonts: Vec<Font>,
    pub styles: Vec<CellStyle>,
    /// Replacement palette from `colors/indexedColors`, starting at index 0
    pub indexed_colors: Vec<[u8; 3]>,
}

impl StyleTables {
    /// Move the tables into the workbook
    pub fn install(self, workbook: &mut Workbook) {
        tracing::debug!(
            fonts = self.fonts.len(),
            styles = self.styles.len(),
            "installing XLSX style tables"
        );
        for (index, rgb) in self.indexed_colors.into_iter().enumerate() {
            workbook.palette_mut().set(index as u16, rgb);
        }
        workbook.set_fonts(self.fonts);
        workbook.set_styles(self.styles);
    }
}

#[derive(Debug)]
struct StylesParser {
    section: Section,
    numfmts: HashMap<u16, String>,
    fonts: Vec<Font>,
    fills: Vec<Fill>,
    borders: Vec<Borders>,
    xfs: Vec<RawXf>,
    indexed_colors: Vec<[u8; 3]>,
    font: Option<Font>,
    fill: Option<Fill>,
    border: Option<Borders>,
    edge: Option<Edge>,
    xf: Option<RawXf>,
}

impl StylesParser {
    fn new() -> Self {
        Self {
            section: Section::Other,
            numfmts: HashMap::new(),
            fonts: Vec::new(),
            fills: Vec::new(),
            borders: Vec::new(),
            xfs: Vec::new(),
            indexed_colors: Vec::new(),
            font: None,
            fill: None,
            border: None,
            edge: None,
            xf: None,
        }
    }

    fn open(&mut self, e: &BytesStart<'_>, empty: bool) {
        let name = e.local_name();
        let name = name.as_ref();

        let container = match name {
            b"numFmts" => Some(Section::NumFmts),
            b"fonts" => Some(Section::Fonts),
            b"fills" => Some(Section::Fills),
            b"borders" => Some(Section::Borders),
            b"cellXfs" => Some(Section::CellXfs),
            b"indexedColors" => Some(Section::IndexedColors),
            b"cellStyleXfs" | b"cellStyles" | b"dxfs" | b"tableStyles" | b"extLst" => {
                Some(Section::Other)
            }
            _ => None,
        };
        if let Some(section) = container {
            if !empty {
                self.section = section;
            }
            return;
        }

        match (self.section, name) {
            (Section::IndexedColors, b"rgbColor") => {
                let rgb = match attr(e, b"rgb").and_then(|v| Color::from_hex(&v)) {
                    Some(Color::Argb { r, g, b, .. }) => [r, g, b],
                    _ => [0, 0, 0],
                };
                self.indexed_colors.push(rgb);
            }

            (Section::NumFmts, b"numFmt") => {
                if let (Some(id), Some(code)) = (attr_parse(e, b"numFmtId"), attr(e, b"formatCode"))
                {
                    self.numfmts.insert(id, code);
                }
            }

            (Section::Fonts, b"font") => {
                self.font = Some(Font {
                    name: String::new(),
                    ..Font::default()
                });
                if empty {
                    self.close(name);
                }
            }
            (Section::Fonts, _) => {
                if let Some(font) = self.font.as_mut() {
                    apply_font_property(font, name, e);
                }
            }

            (Section::Fills, b"fill") => {
                self.fill = Some(Fill::default());
                if empty {
                    self.close(name);
                }
            }
            (Section::Fills, b"patternFill") => {
                if let Some(fill) = self.fill.as_mut() {
                    fill.pattern = attr(e, b"patternType")
                        .map(|p| PatternType::from_ooxml(&p))
                        .unwrap_or(PatternType::None);
                }
            }
            (Section::Fills, b"fgColor") => self.set_fill_color(FillColor::Foreground, e),
            (Section::Fills, b"bgColor") => self.set_fill_color(FillColor::Background, e),

            (Section::Borders, b"border") => {
                self.border = Some(Borders::default());
                if empty {
                    self.close(name);
                }
            }
            (Section::Borders, b"left" | b"start") => self.open_edge(Edge::Left, e, empty),
            (Section::Borders, b"right" | b"end") => self.open_edge(Edge::Right, e, empty),
            (Section::Borders, b"top") => self.open_edge(Edge::Top, e, empty),
            (Section::Borders, b"bottom") => self.open_edge(Edge::Bottom, e, empty),
            (Section::Borders, b"diagonal") => self.open_edge(Edge::Diagonal, e, empty),
            (Section::Borders, b"color") => {
                if let Some(edge) = self.edge_mut() {
                    edge.color = parse_color(e);
                }
            }

            (Section::CellXfs, b"xf") => {
                self.xf = Some(RawXf {
                    num_fmt_id: attr_parse(e, b"numFmtId").unwrap_or(0),
                    font_id: attr_parse(e, b"fontId").unwrap_or(0),
                    fill_id: attr_parse(e, b"fillId").unwrap_or(0),
                    border_id: attr_parse(e, b"borderId").unwrap_or(0),
                    ..RawXf::default()
                });
                if empty {
                    self.close(name);
                }
            }
            (Section::CellXfs, b"alignment") => {
                if let Some(xf) = self.xf.as_mut() {
                    if let Some(h) = attr(e, b"horizontal") {
                        xf.horizontal = HorizontalAlignment::from_ooxml(&h);
                    }
                    if let Some(v) = attr(e, b"vertical") {
                        xf.vertical = VerticalAlignment::from_ooxml(&v);
                    }
                    xf.wrap_text = attr_bool(e, b"wrapText").unwrap_or(false);
                    xf.rotation = rotation_degrees(attr_parse(e, b"textRotation").unwrap_or(0));
                }
            }

            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        match (self.section, name) {
            (_, b"numFmts" | b"fonts" | b"fills" | b"borders" | b"cellXfs")
            | (_, b"cellStyleXfs" | b"cellStyles" | b"dxfs" | b"tableStyles")
            | (_, b"indexedColors" | b"extLst") => self.section = Section::Other,
            (Section::Fonts, b"font") => {
                if let Some(font) = self.font.take() {
                    self.fonts.push(font);
                }
            }
            (Section::Fills, b"fill") => {
                if let Some(fill) = self.fill.take() {
                    self.fills.push(fill);
                }
            }
            (Section::Borders, b"border") => {
                if let Some(border) = self.border.take() {
                    self.borders.push(border);
                }
                self.edge = None;
            }
            (Section::Borders, b"left" | b"start" | b"right" | b"end")
            | (Section::Borders, b"top" | b"bottom" | b"diagonal") => self.edge = None,
            (Section::CellXfs, b"xf") => {
                if let Some(xf) = self.xf.take() {
                    self.xfs.push(xf);
                }
            }
            _ => {}
        }
    }

    fn set_fill_color(&mut self, slot: FillColor, e: &BytesStart<'_>) {
        if let Some(fill) = self.fill.as_mut() {
            let color = parse_color(e);
            match slot {
                FillColor::Foreground => fill.foreground = color,
                FillColor::Background => fill.background = color,
            }
        }
    }

    fn open_edge(&mut self, edge: Edge, e: &BytesStart<'_>, empty: bool) {
        self.edge = Some(edge);
        if let Some(slot) = self.edge_mut() {
            slot.style = attr(e, b"style")
                .map(|s| BorderLineStyle::from_ooxml(&s))
                .unwrap_or(BorderLineStyle::None);
        }
        if empty {
            self.edge = None;
        }
    }

    /// The border edge being parsed; diagonals are read but not kept
    fn edge_mut(&mut self) -> Option<&mut BorderEdge> {
        let border = self.border.as_mut()?;
        match self.edge? {
            Edge::Left => Some(&mut border.left),
            Edge::Right => Some(&mut border.right),
            Edge::Top => Some(&mut border.top),
            Edge::Bottom => Some(&mut border.bottom),
            Edge::Diagonal => None,
        }
    }

    fn number_format(&self, id: u16) -> String {
        self.numfmts
            .get(&id)
            .cloned()
            .or_else(|| builtin_format(id).map(str::to_string))
            .unwrap_or_else(|| "General".to_string())
    }

    fn finish(self) -> StyleTables {
        let font_count = self.fonts.len();
        let styles = self
            .xfs
            .iter()
            .map(|xf| {
                let font = if xf.font_id < font_count.max(1) {
                    xf.font_id
                } else {
                    tracing::warn!("cellXfs entry references missing font {}", xf.font_id);
                    0
                };
                CellStyle {
                    horizontal: xf.horizontal,
                    vertical: xf.vertical,
                    rotation: xf.rotation,
                    wrap_text: xf.wrap_text,
                    font: FontId(font as u32),
                    number_format: self.number_format(xf.num_fmt_id),
                    borders: self.borders.get(xf.border_id).copied().unwrap_or_default(),
                    fill: self.fills.get(xf.fill_id).copied().unwrap_or_default(),
                }
            })
            .collect();

        StyleTables {
            fonts: self.fonts,
            styles,
            indexed_colors: self.indexed_colors,
        }
    }
}

fn apply_font_property(font: &mut Font, name: &[u8], e: &BytesStart<'_>) {
    match name {
        b"name" => {
            if let Some(v) = attr(e, b"val") {
                font.name = v;
            }
        }
        b"sz" => {
            if let Some(points) = attr_parse::<f64>(e, b"val") {
                font.height = (points * 20.0).round().clamp(0.0, u16::MAX as f64) as u16;
            }
        }
        b"b" => font.bold = toggle(e),
        b"i" => font.italic = toggle(e),
        b"strike" => font.strikethrough = toggle(e),
        b"u" => font.underline = attr(e, b"val").map_or(true, |v| v != "none"),
        b"color" => font.color = parse_color(e),
        _ => {}
    }
}

/// Color from a `color`/`fgColor`/`bgColor` element.
///
/// Priority: rgb > theme > indexed > auto; `tint` applies to rgb and theme.
pub(crate) fn parse_color(e: &BytesStart<'_>) -> Color {
    let tint = attr_parse::<f64>(e, b"tint").unwrap_or(0.0);

    if let Some(color) = attr(e, b"rgb").and_then(|rgb| Color::from_hex(&rgb)) {
        return color.with_tint(tint);
    }
    if let Some(index) = attr_parse::<u8>(e, b"theme") {
        return Color::theme(index, tint);
    }
    if let Some(index) = attr_parse::<u16>(e, b"indexed") {
        return Color::Indexed(index);
    }
    Color::Auto
}

/// Parse `xl/styles.xml`
pub(crate) fn read_styles_xml<R: BufRead>(reader: R) -> XlsxResult<StyleTables> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut parser = StylesParser::new();
    let mut buf = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => parser.open(&e, false),
            Ok(Event::Empty(e)) => parser.open(&e, true),
            Ok(Event::End(e)) => parser.close(e.local_name().as_ref()),
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(parser.finish())
}
