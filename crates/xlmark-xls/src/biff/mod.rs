//! BIFF8 (Binary Interchange File Format) handling.
//!
//! A BIFF8 stream is a sequence of records, each with a 4-byte header
//! (2 bytes record type + 2 bytes body length) followed by the body.
//! CONTINUE records (type 0x003C) extend the body of the preceding record
//! beyond the 8224-byte per-record limit.

pub mod cursor;
pub mod records;
pub mod strings;

pub use cursor::ByteCursor;

use crate::error::{XlsError, XlsResult};

/// A logical BIFF8 record with its CONTINUE bodies merged in
#[derive(Debug, Clone)]
pub struct BiffRecord {
    /// Record type ID (e.g. `records::SST`, `records::NUMBER`)
    pub kind: u16,
    /// Record body, continuations included
    pub data: Vec<u8>,
    /// Offsets into `data` where each CONTINUE body starts
    pub continue_at: Vec<usize>,
    /// Byte offset of the record header in the stream
    pub stream_offset: usize,
}

impl BiffRecord {
    /// Cursor over the body that knows the continuation boundaries
    pub fn cursor(&self) -> ByteCursor<'_> {
        ByteCursor::with_boundaries(&self.data, &self.continue_at)
    }
}

/// Split a workbook stream into logical records.
///
/// A truncated trailing record ends the stream; whatever was complete
/// before it is returned.
pub fn read_records(stream: &[u8]) -> XlsResult<Vec<BiffRecord>> {
    let mut records: Vec<BiffRecord> = Vec::new();
    let mut pos = 0usize;

    while pos + 4 <= stream.len() {
        let kind = u16::from_le_bytes([stream[pos], stream[pos + 1]]);
        let len = u16::from_le_bytes([stream[pos + 2], stream[pos + 3]]) as usize;
        let body_start = pos + 4;
        let Some(body) = stream.get(body_start..body_start + len) else {
            tracing::warn!("BIFF record 0x{kind:04X} at {pos} runs past the end of the stream");
            break;
        };

        match (kind, records.last_mut()) {
            (records::CONTINUE, Some(prev)) => {
                prev.continue_at.push(prev.data.len());
                prev.data.extend_from_slice(body);
            }
            (records::CONTINUE, None) => {}
            _ => records.push(BiffRecord {
                kind,
                data: body.to_vec(),
                continue_at: Vec::new(),
                stream_offset: pos,
            }),
        }

        pos = body_start + len;
    }

    if records.is_empty() {
        return Err(XlsError::InvalidFormat("workbook stream holds no records".into()));
    }
    Ok(records)
}

/// Fields of a BOF record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bof {
    /// BIFF version (0x0600 for BIFF8)
    pub version: u16,
    /// Substream type (`records::BOF_*`)
    pub substream: u16,
}

impl Bof {
    pub fn parse(data: &[u8]) -> XlsResult<Self> {
        let mut cur = ByteCursor::new(data);
        Ok(Self {
            version: cur.u16()?,
            substream: cur.u16()?,
        })
    }
}
