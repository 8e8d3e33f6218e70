//! XLS (BIFF8) reader.
//!
//! Opens a Compound File Binary (CFB/OLE2) container, reads the `Workbook`
//! stream, parses BIFF8 records, and populates an [`xlmark_core::Workbook`].

use std::io::{Read, Seek};
use std::path::Path;

use xlmark_core::{
    Cell, CellError, CellRange, CellValue, ColorModel, FormulaResult, PaneInfo, StyleId, Workbook,
    Worksheet, MAX_COLS,
};

use crate::biff::records;
use crate::biff::strings::{parse_sst, read_short_string, read_unicode_string};
use crate::biff::{self, BiffRecord, Bof, ByteCursor};
use crate::error::{XlsError, XlsResult};
use crate::styles::{self, StyleContext};

/// WINDOW2 option flag: panes are frozen
const WINDOW2_FROZEN: u16 = 0x0008;

/// XLS file reader.
pub struct XlsReader;

/// Metadata for a sheet parsed from the BOUNDSHEET record.
#[derive(Debug)]
struct SheetInfo {
    /// Absolute byte offset of the sheet's BOF in the Workbook stream.
    offset: u32,
    /// Sheet type: 0 = worksheet, 2 = chart, 6 = macro/VBA.
    sheet_type: u8,
    name: String,
}

/// Workbook-global state the sheet parsers need
struct Globals {
    sst: Vec<String>,
    style_count: usize,
}

impl XlsReader {
    /// Read an XLS file from a filesystem path.
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsResult<Workbook> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::read(file)
    }

    /// Read an XLS file from any `Read + Seek` source.
    pub fn read<R: Read + Seek>(reader: R) -> XlsResult<Workbook> {
        let mut cfb = cfb::CompoundFile::open(reader)?;

        // BIFF5 files name the stream "Book"; the version check below rejects them
        let stream_path = if cfb.exists("/Workbook") {
            "/Workbook"
        } else if cfb.exists("/Book") {
            "/Book"
        } else {
            return Err(XlsError::InvalidFormat(
                "no Workbook or Book stream found in CFB".into(),
            ));
        };

        let mut stream = Vec::new();
        cfb.open_stream(stream_path)?.read_to_end(&mut stream)?;
        tracing::debug!("read {} byte {} stream", stream.len(), stream_path);

        Self::read_stream(&stream)
    }

    /// Parse a raw BIFF8 workbook stream.
    pub fn read_stream(stream: &[u8]) -> XlsResult<Workbook> {
        let all_records = biff::read_records(stream)?;

        let first = all_records
            .first()
            .filter(|r| r.kind == records::BOF)
            .ok_or_else(|| XlsError::InvalidFormat("stream does not start with BOF".into()))?;
        let bof = Bof::parse(&first.data)?;
        if bof.substream != records::BOF_WORKBOOK_GLOBALS {
            return Err(XlsError::InvalidFormat(format!(
                "first substream has type 0x{:04X}, expected workbook globals",
                bof.substream
            )));
        }
        if bof.version != records::BIFF8_VERSION {
            return Err(XlsError::UnsupportedVersion(bof.version));
        }

        let mut workbook = Workbook::new(ColorModel::Indexed);
        let mut style_ctx = StyleContext::new();
        let mut sheets: Vec<SheetInfo> = Vec::new();
        let mut sst: Vec<String> = Vec::new();

        for rec in all_records.iter().skip(1) {
            match rec.kind {
                records::EOF => break,
                records::SST => sst = parse_sst(&rec.data, &rec.continue_at)?,
                records::BOUNDSHEET => sheets.push(Self::parse_boundsheet(&rec.data)?),
                records::DATEMODE => {
                    let mode = ByteCursor::new(&rec.data).u16().unwrap_or(0);
                    workbook.set_date1904(mode == 1);
                }
                records::FONT => match styles::parse_font(&rec.data) {
                    Ok(font) => style_ctx.fonts.push(font),
                    Err(e) => tracing::warn!("skipping malformed FONT record: {e}"),
                },
                records::FORMAT => match styles::parse_format(&rec.data) {
                    Ok((id, code)) => {
                        style_ctx.formats.insert(id, code);
                    }
                    Err(e) => tracing::warn!("skipping malformed FORMAT record: {e}"),
                },
                records::XF => match styles::parse_xf(&rec.data) {
                    Ok(xf) => style_ctx.xfs.push(xf),
                    Err(e) => tracing::warn!("skipping malformed XF record: {e}"),
                },
                records::PALETTE => style_ctx.palette = styles::parse_palette(&rec.data)?,
                _ => {}
            }
        }

        style_ctx.install(&mut workbook);
        let globals = Globals {
            sst,
            style_count: workbook.styles().len(),
        };

        for info in sheets.iter() {
            if info.sheet_type != records::SHEET_TYPE_WORKSHEET {
                tracing::debug!("skipping non-worksheet sheet {:?}", info.name);
                continue;
            }

            let mut ws = Worksheet::new(info.name.as_str());
            match Self::substream_at(&all_records, info.offset as usize) {
                Some(sheet_records) => Self::parse_sheet_records(sheet_records, &mut ws, &globals)?,
                None => tracing::warn!(
                    "sheet {:?} points at offset {} with no BOF record",
                    info.name,
                    info.offset
                ),
            }
            workbook.push_sheet(ws);
        }

        tracing::info!("read XLS workbook with {} sheet(s)", workbook.sheet_count());
        Ok(workbook)
    }

    /// Parse a BOUNDSHEET record body.
    fn parse_boundsheet(data: &[u8]) -> XlsResult<SheetInfo> {
        let mut cur = ByteCursor::new(data);
        let offset = cur.u32()?;
        let _visibility = cur.u8()?;
        let sheet_type = cur.u8()?;
        let name = read_short_string(&mut cur)?;

        Ok(SheetInfo {
            offset,
            sheet_type,
            name,
        })
    }

    /// The records of the substream whose BOF sits at `offset`, without the
    /// BOF/EOF pair; nested substreams (embedded charts) are skipped.
    fn substream_at(all: &[BiffRecord], offset: usize) -> Option<&[BiffRecord]> {
        let start = all
            .iter()
            .position(|r| r.stream_offset == offset && r.kind == records::BOF)?;

        let mut depth = 0usize;
        for (i, rec) in all.iter().enumerate().skip(start) {
            match rec.kind {
                records::BOF => depth += 1,
                records::EOF => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&all[start + 1..i]);
                    }
                }
                _ => {}
            }
        }
        Some(&all[start + 1..])
    }

    /// Parse cell and structure records from a sheet's substream.
    fn parse_sheet_records(
        records: &[BiffRecord],
        ws: &mut Worksheet,
        globals: &Globals,
    ) -> XlsResult<()> {
        // A FORMULA with a string result is followed by its STRING record
        let mut pending_string: Option<(u32, u16)> = None;
        let mut frozen = false;
        let mut depth = 0usize;

        for rec in records {
            // Embedded chart substreams carry their own BOF/EOF pair
            match rec.kind {
                records::BOF => {
                    depth += 1;
                    continue;
                }
                records::EOF if depth > 0 => {
                    depth -= 1;
                    continue;
                }
                _ if depth > 0 => continue,
                _ => {}
            }

            let mut cur = rec.cursor();
            match rec.kind {
                records::FORMULA => {
                    pending_string = Self::parse_formula(&mut cur, ws, globals)?;
                    continue;
                }
                records::STRING => {
                    if let Some((row, col)) = pending_string.take() {
                        let text = read_unicode_string(&mut cur)?;
                        Self::set_formula_text(ws, row, col, text);
                    }
                    continue;
                }
                records::LABELSST => {
                    let (row, col, style) = Self::cell_header(&mut cur, globals)?;
                    let index = cur.u32()? as usize;
                    let text = globals.sst.get(index).cloned().unwrap_or_else(|| {
                        tracing::warn!("LABELSST at {row}:{col} references missing SST entry {index}");
                        String::new()
                    });
                    Self::put(ws, row, col, style, CellValue::Text(text));
                }
                records::LABEL => {
                    let (row, col, style) = Self::cell_header(&mut cur, globals)?;
                    let text = read_unicode_string(&mut cur)?;
                    Self::put(ws, row, col, style, CellValue::Text(text));
                }
                records::NUMBER => {
                    let (row, col, style) = Self::cell_header(&mut cur, globals)?;
                    let value = cur.f64()?;
                    Self::put(ws, row, col, style, CellValue::Number(value));
                }
                records::RK => {
                    let (row, col, style) = Self::cell_header(&mut cur, globals)?;
                    let value = cur.rk()?;
                    Self::put(ws, row, col, style, CellValue::Number(value));
                }
                records::MULRK => Self::parse_mulrk(&rec.data, ws, globals)?,
                records::BLANK => {
                    let (row, col, style) = Self::cell_header(&mut cur, globals)?;
                    Self::put(ws, row, col, style, CellValue::Blank);
                }
                records::MULBLANK => Self::parse_mulblank(&rec.data, ws, globals)?,
                records::BOOLERR => {
                    let (row, col, style) = Self::cell_header(&mut cur, globals)?;
                    let value = cur.u8()?;
                    let value = if cur.u8()? != 0 {
                        CellValue::Error(CellError::from_code(value).unwrap_or(CellError::Value))
                    } else {
                        CellValue::Boolean(value != 0)
                    };
                    Self::put(ws, row, col, style, value);
                }
                records::ROW => {
                    let row = cur.u16()? as u32;
                    ws.ensure_row(row)?;
                }
                records::MERGECELLS => Self::parse_mergecells(&mut cur, ws)?,
                records::WINDOW2 => {
                    frozen = cur.u16()? & WINDOW2_FROZEN != 0;
                }
                records::PANE => {
                    let split_col = cur.u16()?;
                    let split_row = cur.u16()? as u32;
                    let _top_row = cur.u16()?;
                    let _left_col = cur.u16()?;
                    let active_pane = cur.u8()?;
                    ws.set_pane(Some(PaneInfo {
                        split_row,
                        split_col,
                        frozen,
                        active_pane,
                    }));
                }
                _ => {}
            }
            pending_string = None;
        }

        Ok(())
    }

    /// Common row(2) + col(2) + xf(2) prefix of cell records
    fn cell_header(
        cur: &mut ByteCursor<'_>,
        globals: &Globals,
    ) -> XlsResult<(u32, u16, Option<StyleId>)> {
        let row = cur.u16()? as u32;
        let col = cur.u16()?;
        let xf = cur.u16()?;
        Ok((row, col, Self::style_for(xf, globals)))
    }

    fn style_for(xf: u16, globals: &Globals) -> Option<StyleId> {
        if (xf as usize) < globals.style_count {
            Some(StyleId(xf as u32))
        } else {
            tracing::warn!("cell references missing XF {xf}");
            None
        }
    }

    fn put(ws: &mut Worksheet, row: u32, col: u16, style: Option<StyleId>, value: CellValue) {
        if col >= MAX_COLS {
            tracing::warn!("skipping cell at row {row}, column {col} beyond the sheet limit");
            return;
        }
        let mut cell = Cell::new(col, value);
        cell.style = style;
        ws.insert_cell(row, cell);
    }

    /// MULRK: row(2) + first_col(2) + [xf(2) + rk(4)]* + last_col(2)
    fn parse_mulrk(data: &[u8], ws: &mut Worksheet, globals: &Globals) -> XlsResult<()> {
        let Some(body) = data.len().checked_sub(2).map(|end| &data[..end]) else {
            return Err(XlsError::Truncated {
                offset: 0,
                needed: 6,
            });
        };
        let mut cur = ByteCursor::new(body);
        let row = cur.u16()? as u32;
        let mut col = cur.u16()?;

        while cur.remaining() >= 6 {
            let style = Self::style_for(cur.u16()?, globals);
            let value = cur.rk()?;
            Self::put(ws, row, col, style, CellValue::Number(value));
            let Some(next) = col.checked_add(1) else {
                break;
            };
            col = next;
        }
        Ok(())
    }

    /// MULBLANK: row(2) + first_col(2) + [xf(2)]* + last_col(2)
    fn parse_mulblank(data: &[u8], ws: &mut Worksheet, globals: &Globals) -> XlsResult<()> {
        let Some(body) = data.len().checked_sub(2).map(|end| &data[..end]) else {
            return Ok(());
        };
        let mut cur = ByteCursor::new(body);
        let row = cur.u16()? as u32;
        let mut col = cur.u16()?;

        while cur.remaining() >= 2 {
            let style = Self::style_for(cur.u16()?, globals);
            Self::put(ws, row, col, style, CellValue::Blank);
            let Some(next) = col.checked_add(1) else {
                break;
            };
            col = next;
        }
        Ok(())
    }

    /// FORMULA: row(2) + col(2) + xf(2) + result(8) + options(2) + chn(4) + tokens
    ///
    /// Returns the cell position when the cached result is a string, which
    /// the following STRING record supplies.
    fn parse_formula(
        cur: &mut ByteCursor<'_>,
        ws: &mut Worksheet,
        globals: &Globals,
    ) -> XlsResult<Option<(u32, u16)>> {
        let (row, col, style) = Self::cell_header(cur, globals)?;
        let result = cur.take(8)?;

        // Non-numeric results are flagged by 0xFFFF in the top two bytes
        let (cached, pending) = if result[6] == 0xFF && result[7] == 0xFF {
            match result[0] {
                0x00 => (FormulaResult::Text(String::new()), true),
                0x01 => (FormulaResult::Boolean(result[2] != 0), false),
                0x02 => (
                    FormulaResult::Error(CellError::from_code(result[2]).unwrap_or(CellError::Value)),
                    false,
                ),
                _ => (FormulaResult::None, false),
            }
        } else {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(result);
            (FormulaResult::Number(f64::from_le_bytes(raw)), false)
        };

        // Parsed formula tokens are not decompiled back to text
        Self::put(ws, row, col, style, CellValue::formula("", cached));
        Ok(pending.then_some((row, col)))
    }

    fn set_formula_text(ws: &mut Worksheet, row: u32, col: u16, text: String) {
        let style = ws.cell_at(row, col).and_then(|c| c.style);
        Self::put(ws, row, col, style, CellValue::formula("", FormulaResult::Text(text)));
    }

    /// MERGECELLS: count(2) + [first_row(2) + last_row(2) + first_col(2) + last_col(2)]*
    fn parse_mergecells(cur: &mut ByteCursor<'_>, ws: &mut Worksheet) -> XlsResult<()> {
        let count = cur.u16()?;
        for _ in 0..count {
            if cur.remaining() < 8 {
                break;
            }
            let first_row = cur.u16()? as u32;
            let last_row = cur.u16()? as u32;
            let first_col = cur.u16()?;
            let last_col = cur.u16()?;

            let range = CellRange::from_indices(first_row, first_col, last_row, last_col);
            if let Err(e) = ws.merge_cells(range) {
                tracing::warn!("ignoring merged region {range}: {e}");
            }
        }
        Ok(())
    }
}
