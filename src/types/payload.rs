//! Bounds-checked little-endian cursor over a packet body.
//!
//! Every multi-byte field on the wire is little-endian. [`PayloadReader`]
//! wraps the bytes after the 2-byte packet code and turns out-of-bounds reads
//! into [`TelemetryError::Truncated`] instead of panics, carrying the packet
//! kind and the offending offsets for diagnostics.

use crate::error::{Result, TelemetryError};
use crate::types::PacketKind;

/// Sequential reader over one packet body.
///
/// Positions in errors are body-relative: byte 0 is the first byte after the
/// packet code. Bytes past what a decoder consumes are tolerated and simply
/// left unread.
#[derive(Debug)]
pub struct PayloadReader<'a> {
    kind: PacketKind,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> PayloadReader<'a> {
    /// Wraps a packet body for the given kind.
    pub fn new(kind: PacketKind, bytes: &'a [u8]) -> Self {
        Self { kind, bytes, pos: 0 }
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        let [byte] = self.take::<1>()?;
        Ok(byte)
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.take::<2>()?))
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take::<4>()?))
    }

    /// Reads a little-endian `i32`.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.take::<4>()?))
    }

    /// Advances past `n` bytes the decoder does not expose.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(self.truncated(n));
        }
        self.pos += n;
        Ok(())
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Bytes consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        if self.remaining() < N {
            return Err(self.truncated(N));
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    fn truncated(&self, wanted: usize) -> TelemetryError {
        TelemetryError::truncated(self.kind, self.pos + wanted, self.bytes.len())
    }
}
