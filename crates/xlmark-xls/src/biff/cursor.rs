//! Little-endian reader over a record body.
//!
//! A [`ByteCursor`] tracks its position and knows where CONTINUE bodies were
//! spliced into the record, so string decoding can pick up the fresh option
//! byte each continuation starts with.

use crate::error::{XlsError, XlsResult};

/// Forward-only reader over one record body
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
    boundaries: &'a [usize],
}

impl<'a> ByteCursor<'a> {
    /// Cursor over a body without continuation boundaries
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_boundaries(data, &[])
    }

    /// Cursor over a body assembled from several physical records;
    /// `boundaries` are the offsets where each CONTINUE body starts
    pub fn with_boundaries(data: &'a [u8], boundaries: &'a [usize]) -> Self {
        Self {
            data,
            pos: 0,
            boundaries,
        }
    }

    /// Current offset into the body
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Whether the cursor sits exactly at the start of a CONTINUE body
    pub fn at_boundary(&self) -> bool {
        self.boundaries.binary_search(&self.pos).is_ok()
    }

    /// Borrow the next `n` bytes and advance past them
    pub fn take(&mut self, n: usize) -> XlsResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(XlsError::Truncated {
                offset: self.pos,
                needed: n - self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Advance without reading; skipping past the end clamps to the end
    pub fn skip(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.data.len());
    }

    #[inline]
    pub fn u8(&mut self) -> XlsResult<u8> {
        Ok(self.take(1)?[0])
    }

    #[inline]
    pub fn u16(&mut self) -> XlsResult<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    #[inline]
    pub fn u32(&mut self) -> XlsResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    #[inline]
    pub fn f64(&mut self) -> XlsResult<f64> {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(self.take(8)?);
        Ok(f64::from_le_bytes(raw))
    }

    /// Read an RK-encoded number
    #[inline]
    pub fn rk(&mut self) -> XlsResult<f64> {
        self.u32().map(decode_rk)
    }
}

/// Decode an RK-encoded number.
///
/// - Bit 0: the decoded number is divided by 100
/// - Bit 1: bits 2..31 hold a signed 30-bit integer; otherwise they are
///   the upper 30 bits of an IEEE 754 double whose low 34 bits are zero
pub fn decode_rk(rk: u32) -> f64 {
    let value = if rk & 0x02 != 0 {
        ((rk as i32) >> 2) as f64
    } else {
        f64::from_bits(((rk & 0xFFFF_FFFC) as u64) << 32)
    };

    if rk & 0x01 != 0 {
        value / 100.0
    } else {
        value
    }
}
