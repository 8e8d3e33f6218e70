//! Worksheet part parsing: rows, cells, merged regions and the first pane.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use xlmark_core::worksheet::{
    PANE_LOWER_LEFT, PANE_LOWER_RIGHT, PANE_UPPER_LEFT, PANE_UPPER_RIGHT,
};
use xlmark_core::{
    Cell, CellAddress, CellError, CellRange, CellValue, FormulaResult, PaneInfo, StyleId,
    Worksheet,
};

use crate::error::{XlsxError, XlsxResult};
use crate::xml::{attr, attr_parse, decode_excel_escapes};

/// Workbook-level tables a worksheet refers to
pub(crate) struct SheetContext<'a> {
    pub shared_strings: &'a [String],
    pub style_count: usize,
}

/// Which element's text is being collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    None,
    Value,
    Formula,
    Inline,
}

/// A `<c>` element being assembled
#[derive(Debug, Default)]
struct PendingCell {
    row: u32,
    col: u16,
    kind: Option<String>,
    style: Option<StyleId>,
    value: Option<String>,
    formula: Option<String>,
    inline: Option<String>,
}

impl PendingCell {
    fn into_value(self, shared_strings: &[String]) -> CellValue {
        let kind = self.kind.as_deref().unwrap_or("n");

        if let Some(formula) = self.formula {
            let cached = match self.value {
                None => FormulaResult::None,
                Some(v) => match kind {
                    "str" | "inlineStr" => FormulaResult::Text(decode_excel_escapes(&v)),
                    "b" => FormulaResult::Boolean(v.trim() == "1"),
                    "e" => CellError::parse(&v)
                        .map(FormulaResult::Error)
                        .unwrap_or(FormulaResult::Text(v)),
                    "s" => FormulaResult::Text(shared_string(shared_strings, &v)),
                    _ => v
                        .trim()
                        .parse()
                        .map(FormulaResult::Number)
                        .unwrap_or(FormulaResult::None),
                },
            };
            return CellValue::formula(formula, cached);
        }

        if kind == "inlineStr" {
            return match self.inline.or(self.value) {
                Some(text) => CellValue::Text(decode_excel_escapes(&text)),
                None => CellValue::Blank,
            };
        }

        let Some(v) = self.value else {
            return CellValue::Blank;
        };
        match kind {
            "s" => CellValue::Text(shared_string(shared_strings, &v)),
            "b" => CellValue::Boolean(v.trim() == "1"),
            "e" => CellError::parse(&v)
                .map(CellValue::Error)
                .unwrap_or(CellValue::Text(v)),
            "str" => CellValue::Text(decode_excel_escapes(&v)),
            // ISO 8601 dates are kept as written
            "d" => CellValue::Text(v),
            _ => match v.trim().parse() {
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::Text(v),
            },
        }
    }
}

fn shared_string(shared_strings: &[String], index: &str) -> String {
    match index.trim().parse::<usize>().ok().and_then(|i| shared_strings.get(i)) {
        Some(s) => s.clone(),
        None => {
            tracing::warn!(index, count = shared_strings.len(), "shared string index out of range");
            String::new()
        }
    }
}

/// Map `activePane` names onto the pane codes
fn active_pane_code(name: Option<&str>) -> u8 {
    match name {
        Some("bottomRight") => PANE_LOWER_RIGHT,
        Some("topRight") => PANE_UPPER_RIGHT,
        Some("bottomLeft") => PANE_LOWER_LEFT,
        _ => PANE_UPPER_LEFT,
    }
}

fn parse_pane(e: &BytesStart<'_>) -> PaneInfo {
    // splits of unfrozen panes are in twips, frozen ones count rows and columns
    let split = |key: &[u8]| attr_parse::<f64>(e, key).unwrap_or(0.0).max(0.0);
    PaneInfo {
        split_row: split(b"ySplit") as u32,
        split_col: split(b"xSplit").min(u16::MAX as f64) as u16,
        frozen: attr(e, b"state").as_deref() == Some("frozen"),
        active_pane: active_pane_code(attr(e, b"activePane").as_deref()),
    }
}

struct SheetParser<'a> {
    sheet: Worksheet,
    ctx: &'a SheetContext<'a>,
    next_row: u32,
    current_row: Option<u32>,
    next_col: u16,
    cell: Option<PendingCell>,
    target: TextTarget,
    in_inline: bool,
    in_phonetic: bool,
    in_first_view: bool,
    views_seen: usize,
}

impl<'a> SheetParser<'a> {
    fn new(name: &str, ctx: &'a SheetContext<'a>) -> Self {
        Self {
            sheet: Worksheet::new(name),
            ctx,
            next_row: 0,
            current_row: None,
            next_col: 0,
            cell: None,
            target: TextTarget::None,
            in_inline: false,
            in_phonetic: false,
            in_first_view: false,
            views_seen: 0,
        }
    }

    fn open(&mut self, e: &BytesStart<'_>, empty: bool) -> XlsxResult<()> {
        match e.local_name().as_ref() {
            b"row" => {
                let row = attr_parse::<u32>(e, b"r")
                    .and_then(|r| r.checked_sub(1))
                    .unwrap_or(self.next_row);
                self.sheet.ensure_row(row)?;
                self.next_row = row + 1;
                self.next_col = 0;
                self.current_row = (!empty).then_some(row);
            }
            b"c" => {
                let (row, col) = match attr(e, b"r").map(|r| CellAddress::parse(&r)) {
                    Some(Ok(addr)) => (addr.row, addr.col),
                    Some(Err(err)) => return Err(XlsxError::Parse(err.to_string())),
                    None => (
                        self.current_row.unwrap_or(self.next_row.saturating_sub(1)),
                        self.next_col,
                    ),
                };
                self.next_col = col.saturating_add(1);
                self.cell = Some(PendingCell {
                    row,
                    col,
                    kind: attr(e, b"t"),
                    style: self.style_id(e),
                    ..Default::default()
                });
                if empty {
                    self.finish_cell();
                }
            }
            b"v" if self.cell.is_some() => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.value.get_or_insert_with(String::new);
                }
                if !empty {
                    self.target = TextTarget::Value;
                }
            }
            b"f" if self.cell.is_some() => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.formula.get_or_insert_with(String::new);
                }
                if !empty {
                    self.target = TextTarget::Formula;
                }
            }
            b"is" if self.cell.is_some() => self.in_inline = true,
            b"rPh" => self.in_phonetic = true,
            b"t" if self.in_inline && !self.in_phonetic => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.inline.get_or_insert_with(String::new);
                }
                if !empty {
                    self.target = TextTarget::Inline;
                }
            }
            b"mergeCell" => {
                if let Some(reference) = attr(e, b"ref") {
                    let range = CellRange::parse(&reference)?;
                    if let Err(err) = self.sheet.merge_cells(range) {
                        tracing::warn!(%err, "ignoring merged region");
                    }
                }
            }
            b"sheetView" => {
                self.in_first_view = self.views_seen == 0 && !empty;
                self.views_seen += 1;
            }
            b"pane" if self.in_first_view => {
                self.sheet.set_pane(Some(parse_pane(e)));
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"row" => self.current_row = None,
            b"c" => self.finish_cell(),
            b"v" | b"f" | b"t" => self.target = TextTarget::None,
            b"is" => self.in_inline = false,
            b"rPh" => self.in_phonetic = false,
            b"sheetView" => self.in_first_view = false,
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        let Some(cell) = self.cell.as_mut() else {
            return;
        };
        let slot = match self.target {
            TextTarget::None => return,
            TextTarget::Value => &mut cell.value,
            TextTarget::Formula => &mut cell.formula,
            TextTarget::Inline => &mut cell.inline,
        };
        slot.get_or_insert_with(String::new).push_str(text);
    }

    fn style_id(&self, e: &BytesStart<'_>) -> Option<StyleId> {
        let index = attr_parse::<u32>(e, b"s")?;
        if (index as usize) < self.ctx.style_count {
            Some(StyleId(index))
        } else {
            tracing::warn!(
                index,
                styles = self.ctx.style_count,
                "cell style index out of range"
            );
            None
        }
    }

    fn finish_cell(&mut self) {
        self.target = TextTarget::None;
        self.in_inline = false;
        let Some(pending) = self.cell.take() else {
            return;
        };
        let (row, col, style) = (pending.row, pending.col, pending.style);
        let mut cell = Cell::new(col, pending.into_value(self.ctx.shared_strings));
        cell.style = style;
        if !self.sheet.insert_cell(row, cell) {
            tracing::warn!("skipping cell at row {row}, column {col} beyond the sheet limit");
        }
    }
}

/// Parse one `xl/worksheets/sheetN.xml` part
pub(crate) fn read_worksheet<R: BufRead>(
    reader: R,
    name: &str,
    ctx: &SheetContext<'_>,
) -> XlsxResult<Worksheet> {
    let mut xml_reader = Reader::from_reader(reader);
    // cell text keeps its whitespace
    xml_reader.trim_text(false);

    let mut parser = SheetParser::new(name, ctx);
    let mut buf = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => parser.open(&e, false)?,
            Ok(Event::Empty(e)) => parser.open(&e, true)?,
            Ok(Event::End(e)) => parser.close(e.local_name().as_ref()),
            Ok(Event::Text(e)) if parser.target != TextTarget::None => {
                parser.text(&e.unescape()?);
            }
            Ok(Event::CData(e)) if parser.target != TextTarget::None => {
                parser.text(&String::from_utf8_lossy(&e));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(parser.sheet)
}
