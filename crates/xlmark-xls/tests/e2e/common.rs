//! Common utilities for XLS E2E tests: a small BIFF8 writer.

use std::io::{Cursor, Write};

pub const BOF: u16 = 0x0809;
pub const EOF: u16 = 0x000A;
pub const BOUNDSHEET: u16 = 0x0085;
pub const SST: u16 = 0x00FC;
pub const CONTINUE: u16 = 0x003C;
pub const DATEMODE: u16 = 0x0022;
pub const PALETTE: u16 = 0x0092;
pub const FONT: u16 = 0x0031;
pub const FORMAT: u16 = 0x041E;
pub const XF: u16 = 0x00E0;
pub const LABELSST: u16 = 0x00FD;
pub const LABEL: u16 = 0x0204;
pub const NUMBER: u16 = 0x0203;
pub const RK: u16 = 0x027E;
pub const MULRK: u16 = 0x00BD;
pub const BLANK: u16 = 0x0201;
pub const MULBLANK: u16 = 0x00BE;
pub const BOOLERR: u16 = 0x0205;
pub const FORMULA: u16 = 0x0006;
pub const STRING: u16 = 0x0207;
pub const ROW: u16 = 0x0208;
pub const MERGECELLS: u16 = 0x00E5;
pub const WINDOW2: u16 = 0x023E;
pub const PANE: u16 = 0x0041;

/// Encode one physical record
pub fn record(kind: u16, body: &[u8]) -> Vec<u8> {
    let mut out = kind.to_le_bytes().to_vec();
    out.extend_from_slice(&(body.len() as u16).to_le_bytes());
    out.extend_from_slice(body);
    out
}

/// 2-byte-length compressed string
pub fn unicode_string(s: &str) -> Vec<u8> {
    let mut out = (s.len() as u16).to_le_bytes().to_vec();
    out.push(0);
    out.extend_from_slice(s.as_bytes());
    out
}

pub fn bof(substream: u16) -> Vec<u8> {
    let mut body = 0x0600u16.to_le_bytes().to_vec();
    body.extend_from_slice(&substream.to_le_bytes());
    body.extend_from_slice(&[0; 12]);
    record(BOF, &body)
}

pub fn font(height: u16, bold: bool, italic: bool, color: u16, name: &str) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&height.to_le_bytes());
    body.extend_from_slice(&(if italic { 0x0002u16 } else { 0 }).to_le_bytes());
    body.extend_from_slice(&color.to_le_bytes());
    body.extend_from_slice(&(if bold { 700u16 } else { 400 }).to_le_bytes());
    body.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
    body.push(name.len() as u8);
    body.push(0);
    body.extend_from_slice(name.as_bytes());
    record(FONT, &body)
}

pub fn format(id: u16, code: &str) -> Vec<u8> {
    let mut body = id.to_le_bytes().to_vec();
    body.extend(unicode_string(code));
    record(FORMAT, &body)
}

/// XF fields in the packed layout the record stores
#[derive(Debug, Clone, Copy, Default)]
pub struct XfFields {
    pub font: u16,
    pub format: u16,
    pub halign: u8,
    pub valign: u8,
    pub rotation: u8,
    /// left, right, top, bottom line styles
    pub borders: [u8; 4],
    /// left, right, top, bottom palette indices
    pub border_colors: [u8; 4],
    pub pattern: u8,
    pub fill_fore: u16,
    pub fill_back: u16,
}

impl XfFields {
    pub fn new() -> Self {
        Self {
            valign: 2,
            fill_fore: 64,
            fill_back: 65,
            ..Default::default()
        }
    }
}

pub fn xf(fields: XfFields) -> Vec<u8> {
    let b1 = fields.borders[0] as u32
        | (fields.borders[1] as u32) << 4
        | (fields.borders[2] as u32) << 8
        | (fields.borders[3] as u32) << 12
        | (fields.border_colors[0] as u32) << 16
        | (fields.border_colors[1] as u32) << 23;
    let b2 = fields.border_colors[2] as u32
        | (fields.border_colors[3] as u32) << 7
        | (fields.pattern as u32) << 26;
    let fill = (fields.fill_fore & 0x7F) | (fields.fill_back & 0x7F) << 7;

    let mut body = Vec::new();
    body.extend_from_slice(&fields.font.to_le_bytes());
    body.extend_from_slice(&fields.format.to_le_bytes());
    body.extend_from_slice(&0u16.to_le_bytes());
    body.push(fields.halign | fields.valign << 4);
    body.push(fields.rotation);
    body.extend_from_slice(&[0, 0]);
    body.extend_from_slice(&b1.to_le_bytes());
    body.extend_from_slice(&b2.to_le_bytes());
    body.extend_from_slice(&fill.to_le_bytes());
    record(XF, &body)
}

pub fn sst(strings: &[&str]) -> Vec<u8> {
    let mut body = (strings.len() as u32).to_le_bytes().to_vec();
    body.extend_from_slice(&(strings.len() as u32).to_le_bytes());
    for s in strings {
        body.extend(unicode_string(s));
    }
    record(SST, &body)
}

fn cell_prefix(row: u16, col: u16, xf: u16) -> Vec<u8> {
    let mut body = row.to_le_bytes().to_vec();
    body.extend_from_slice(&col.to_le_bytes());
    body.extend_from_slice(&xf.to_le_bytes());
    body
}

pub fn labelsst(row: u16, col: u16, xf: u16, index: u32) -> Vec<u8> {
    let mut body = cell_prefix(row, col, xf);
    body.extend_from_slice(&index.to_le_bytes());
    record(LABELSST, &body)
}

pub fn label(row: u16, col: u16, xf: u16, text: &str) -> Vec<u8> {
    let mut body = cell_prefix(row, col, xf);
    body.extend(unicode_string(text));
    record(LABEL, &body)
}

pub fn number(row: u16, col: u16, xf: u16, value: f64) -> Vec<u8> {
    let mut body = cell_prefix(row, col, xf);
    body.extend_from_slice(&value.to_le_bytes());
    record(NUMBER, &body)
}

/// RK holding a 30-bit integer
pub fn rk_int(row: u16, col: u16, xf: u16, value: i32) -> Vec<u8> {
    let mut body = cell_prefix(row, col, xf);
    body.extend_from_slice(&(((value << 2) as u32) | 0x02).to_le_bytes());
    record(RK, &body)
}

pub fn mulrk_ints(row: u16, first_col: u16, xf: u16, values: &[i32]) -> Vec<u8> {
    let mut body = row.to_le_bytes().to_vec();
    body.extend_from_slice(&first_col.to_le_bytes());
    for v in values {
        body.extend_from_slice(&xf.to_le_bytes());
        body.extend_from_slice(&(((v << 2) as u32) | 0x02).to_le_bytes());
    }
    body.extend_from_slice(&(first_col + values.len() as u16 - 1).to_le_bytes());
    record(MULRK, &body)
}

pub fn blank(row: u16, col: u16, xf: u16) -> Vec<u8> {
    record(BLANK, &cell_prefix(row, col, xf))
}

pub fn mulblank(row: u16, first_col: u16, xfs: &[u16]) -> Vec<u8> {
    let mut body = row.to_le_bytes().to_vec();
    body.extend_from_slice(&first_col.to_le_bytes());
    for x in xfs {
        body.extend_from_slice(&x.to_le_bytes());
    }
    body.extend_from_slice(&(first_col + xfs.len() as u16 - 1).to_le_bytes());
    record(MULBLANK, &body)
}

pub fn boolerr(row: u16, col: u16, xf: u16, value: u8, is_error: bool) -> Vec<u8> {
    let mut body = cell_prefix(row, col, xf);
    body.push(value);
    body.push(is_error as u8);
    record(BOOLERR, &body)
}

/// FORMULA with a raw 8-byte cached result and an empty token array
pub fn formula(row: u16, col: u16, xf: u16, result: [u8; 8]) -> Vec<u8> {
    let mut body = cell_prefix(row, col, xf);
    body.extend_from_slice(&result);
    body.extend_from_slice(&[0; 6]);
    body.extend_from_slice(&0u16.to_le_bytes());
    record(FORMULA, &body)
}

pub fn string(text: &str) -> Vec<u8> {
    record(STRING, &unicode_string(text))
}

pub fn row(index: u16) -> Vec<u8> {
    let mut body = index.to_le_bytes().to_vec();
    body.extend_from_slice(&[0; 14]);
    record(ROW, &body)
}

pub fn mergecells(ranges: &[(u16, u16, u16, u16)]) -> Vec<u8> {
    let mut body = (ranges.len() as u16).to_le_bytes().to_vec();
    for (r1, r2, c1, c2) in ranges {
        for v in [r1, r2, c1, c2] {
            body.extend_from_slice(&v.to_le_bytes());
        }
    }
    record(MERGECELLS, &body)
}

pub fn window2(frozen: bool) -> Vec<u8> {
    let grbit: u16 = 0x06B6 | if frozen { 0x0008 } else { 0 };
    let mut body = grbit.to_le_bytes().to_vec();
    body.extend_from_slice(&[0; 16]);
    record(WINDOW2, &body)
}

pub fn pane(split_col: u16, split_row: u16, active: u8) -> Vec<u8> {
    let mut body = split_col.to_le_bytes().to_vec();
    body.extend_from_slice(&split_row.to_le_bytes());
    body.extend_from_slice(&split_row.to_le_bytes());
    body.extend_from_slice(&split_col.to_le_bytes());
    body.push(active);
    body.push(0);
    record(PANE, &body)
}

/// A workbook stream under construction
pub struct XlsBuilder {
    globals: Vec<u8>,
    sheets: Vec<(String, Vec<u8>)>,
}

impl XlsBuilder {
    /// Globals with one Arial font and the default style XF
    pub fn new() -> Self {
        let mut b = Self {
            globals: Vec::new(),
            sheets: Vec::new(),
        };
        b.push_global(font(200, false, false, 0x7FFF, "Arial"));
        b.push_global(xf(XfFields::new()));
        b
    }

    /// Globals without any FONT or XF record
    pub fn bare() -> Self {
        Self {
            globals: Vec::new(),
            sheets: Vec::new(),
        }
    }

    pub fn push_global(&mut self, rec: Vec<u8>) -> &mut Self {
        self.globals.extend(rec);
        self
    }

    pub fn sheet(&mut self, name: &str, records: Vec<Vec<u8>>) -> &mut Self {
        self.sheets.push((name.to_string(), records.concat()));
        self
    }

    /// Lay out globals, BOUNDSHEETs with their stream offsets, and sheets
    pub fn stream(&self) -> Vec<u8> {
        let boundsheet_len =
            |name: &str| 4 + 4 + 1 + 1 + 2 + name.len();
        let globals_len = bof(0x0005).len()
            + self.globals.len()
            + self.sheets.iter().map(|(n, _)| boundsheet_len(n)).sum::<usize>()
            + record(EOF, &[]).len();

        let mut offset = globals_len;
        let mut out = bof(0x0005);
        out.extend_from_slice(&self.globals);
        for (name, body) in &self.sheets {
            let mut bs = (offset as u32).to_le_bytes().to_vec();
            bs.extend_from_slice(&[0, 0]);
            bs.push(name.len() as u8);
            bs.push(0);
            bs.extend_from_slice(name.as_bytes());
            out.extend(record(BOUNDSHEET, &bs));
            offset += bof(0x0010).len() + body.len() + record(EOF, &[]).len();
        }
        out.extend(record(EOF, &[]));

        for (_, body) in &self.sheets {
            out.extend(bof(0x0010));
            out.extend_from_slice(body);
            out.extend(record(EOF, &[]));
        }
        out
    }

    /// The stream wrapped in a CFB container, as an .xls file's bytes
    pub fn build(&self) -> Vec<u8> {
        wrap_in_cfb(&self.stream())
    }
}

pub fn wrap_in_cfb(stream: &[u8]) -> Vec<u8> {
    let mut comp = cfb::CompoundFile::create(Cursor::new(Vec::new())).unwrap();
    {
        let mut s = comp.create_stream("/Workbook").unwrap();
        s.write_all(stream).unwrap();
        s.flush().unwrap();
    }
    comp.flush().unwrap();
    comp.into_inner().into_inner()
}
