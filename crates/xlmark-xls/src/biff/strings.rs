//! BIFF8 Unicode string decoding.
//!
//! A BIFF8 string is a header followed by character data:
//! - char_count (1 or 2 bytes) + flags (1 byte)
//! - flags bit 0: 0 = compressed Latin-1, 1 = UTF-16LE
//! - flags bit 2: extended (phonetic) data size follows (4 bytes)
//! - flags bit 3: rich text run count follows (2 bytes)
//!
//! Inside the SST, character data may run into a CONTINUE record. Each
//! continuation then opens with a new flags byte that can switch between
//! compressed and UTF-16 storage.

use super::cursor::ByteCursor;
use crate::error::XlsResult;

const FLAG_WIDE: u8 = 0x01;
const FLAG_EXT: u8 = 0x04;
const FLAG_RICH: u8 = 0x08;

/// Read a string with a 1-byte length prefix (BOUNDSHEET, FONT)
pub fn read_short_string(cur: &mut ByteCursor<'_>) -> XlsResult<String> {
    let count = cur.u8()? as usize;
    let flags = cur.u8()?;
    read_characters(cur, count, flags)
}

/// Read a string with a 2-byte length prefix (SST, LABEL, FORMAT, STRING)
pub fn read_unicode_string(cur: &mut ByteCursor<'_>) -> XlsResult<String> {
    let count = cur.u16()? as usize;
    let flags = cur.u8()?;

    let runs = if flags & FLAG_RICH != 0 { cur.u16()? } else { 0 };
    let ext_size = if flags & FLAG_EXT != 0 { cur.u32()? } else { 0 };

    let text = read_characters(cur, count, flags)?;

    // Formatting runs are 4 bytes each (char position + font index)
    cur.skip(runs as usize * 4);
    cur.skip(ext_size as usize);

    Ok(text)
}

fn read_characters(cur: &mut ByteCursor<'_>, count: usize, flags: u8) -> XlsResult<String> {
    let mut wide = flags & FLAG_WIDE != 0;
    let mut units: Vec<u16> = Vec::with_capacity(count);

    while units.len() < count {
        if cur.at_boundary() {
            wide = cur.u8()? & FLAG_WIDE != 0;
        }
        let unit = if wide {
            cur.u16()?
        } else {
            cur.u8()? as u16
        };
        units.push(unit);
    }

    if wide || units.iter().any(|&u| u > 0xFF) {
        Ok(String::from_utf16_lossy(&units))
    } else {
        Ok(units.iter().map(|&u| char::from(u as u8)).collect())
    }
}

/// Parse the Shared String Table.
///
/// The body starts with the total reference count and the number of unique
/// strings (4 bytes each), followed by the unique strings.
pub fn parse_sst(data: &[u8], boundaries: &[usize]) -> XlsResult<Vec<String>> {
    let mut cur = ByteCursor::with_boundaries(data, boundaries);

    let _total = cur.u32()?;
    let unique = cur.u32()? as usize;

    let mut strings = Vec::with_capacity(unique.min(data.len()));
    for i in 0..unique {
        match read_unicode_string(&mut cur) {
            Ok(s) => strings.push(s),
            Err(e) => {
                tracing::warn!("SST truncated at string {i}/{unique}: {e}");
                break;
            }
        }
    }

    Ok(strings)
}
