//! Delimiter-based frame extraction from a raw byte stream.
//!
//! Marvelmind modems separate packets with a fixed two-byte marker
//! ([`DELIMITER`], `0xFF 0x47`). Chunks arriving from a serial port cut the
//! stream at arbitrary positions, so [`FrameSplitter`] keeps the bytes after
//! the last complete marker as carry-over and prepends them to the next chunk.
//! A frame is everything between two consecutive markers.
//!
//! The splitter is purely byte-level: it does not inspect frame contents, so a
//! payload that happens to contain the marker bytes is cut there too. Such
//! collisions surface downstream as truncated-packet errors and cost at most
//! the affected frames.
//!
//! ```rust
//! use hedgelink::framing::{FrameSplitter, DELIMITER};
//!
//! let mut splitter = FrameSplitter::new();
//! let mut wire = vec![0x11, 0x22];
//! wire.extend_from_slice(&DELIMITER);
//! wire.extend_from_slice(&[0x33]);
//!
//! let frames = splitter.push(&wire);
//! assert_eq!(frames.len(), 1);
//! assert_eq!(&frames[0][..], &[0x11, 0x22]);
//! assert_eq!(splitter.carry_len(), 1); // 0x33 waits for the next marker
//! ```

use bytes::{Buf, Bytes, BytesMut};
use tracing::{debug, trace};

/// Two-byte frame marker emitted by the modem between packets.
pub const DELIMITER: [u8; 2] = [0xFF, 0x47];

/// Default bound on the carry-over buffer.
///
/// Real packets are tens of bytes; a carry this large means the stream has
/// desynchronized (wrong baud rate, binary garbage) and holding more would
/// only grow memory without ever producing a frame.
pub const DEFAULT_MAX_CARRY: usize = 64 * 1024;

/// Incremental splitter that turns arbitrary byte chunks into frames.
///
/// Feed chunks in stream order with [`push`](Self::push); each call returns
/// the frames completed by that chunk. Bytes after the last marker are held
/// until a later chunk completes them, including the case where the marker
/// itself is split across two chunks.
#[derive(Debug)]
pub struct FrameSplitter {
    carry: BytesMut,
    max_carry: usize,
    overflows: u64,
}

impl FrameSplitter {
    /// Creates a splitter with the default carry bound.
    pub fn new() -> Self {
        Self::with_max_carry(DEFAULT_MAX_CARRY)
    }

    /// Creates a splitter that discards the carry once it exceeds `max_carry`
    /// bytes without containing a marker.
    pub fn with_max_carry(max_carry: usize) -> Self {
        Self { carry: BytesMut::new(), max_carry, overflows: 0 }
    }

    /// Appends a chunk and returns every frame it completed, in stream order.
    ///
    /// Empty frames (back-to-back markers, or a chunk starting with a marker
    /// right after one) are dropped here: they carry no packet and are an
    /// artifact of how the modem spaces its output.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Bytes> {
        self.carry.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(idx) = find_delimiter(&self.carry) {
            let frame = self.carry.split_to(idx).freeze();
            self.carry.advance(DELIMITER.len());
            if !frame.is_empty() {
                frames.push(frame);
            }
        }

        if self.carry.len() > self.max_carry {
            self.overflows += 1;
            debug!(
                dropped = self.carry.len(),
                max_carry = self.max_carry,
                "carry-over exceeded bound without a frame marker, discarding"
            );
            self.carry.clear();
        }

        trace!(
            chunk_len = chunk.len(),
            frames = frames.len(),
            carry = self.carry.len(),
            "split chunk"
        );
        frames
    }

    /// Discards the carry-over buffer.
    ///
    /// Call after a stream discontinuity (reconnect, device reset): the held
    /// bytes belong to a frame whose remainder will never arrive.
    pub fn reset(&mut self) {
        if !self.carry.is_empty() {
            trace!(dropped = self.carry.len(), "frame splitter reset");
        }
        self.carry.clear();
    }

    /// Number of bytes currently held waiting for the next marker.
    pub fn carry_len(&self) -> usize {
        self.carry.len()
    }

    /// Number of times the carry bound was hit and the buffer discarded.
    pub fn overflow_count(&self) -> u64 {
        self.overflows
    }
}

impl Default for FrameSplitter {
    fn default() -> Self {
        Self::new()
    }
}

fn find_delimiter(buf: &[u8]) -> Option<usize> {
    buf.windows(DELIMITER.len()).position(|window| window == DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concat(parts: &[&[u8]]) -> Vec<u8> {
        parts.concat()
    }

    #[test]
    fn stream_without_markers_emits_nothing() {
        let mut splitter = FrameSplitter::new();
        let frames = splitter.push(&[0x01, 0x02, 0x03, 0xFF, 0xFE]);

        assert!(frames.is_empty());
        assert_eq!(splitter.carry_len(), 5);
    }

    #[test]
    fn marker_terminates_a_frame() {
        let mut splitter = FrameSplitter::new();
        let frames = splitter.push(&concat(&[&[0xAA, 0xBB], &DELIMITER]));

        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &[0xAA, 0xBB]);
        assert_eq!(splitter.carry_len(), 0);
    }

    #[test]
    fn marker_split_across_chunks_still_cuts() {
        let mut splitter = FrameSplitter::new();

        assert!(splitter.push(&[0xAA, 0xBB, 0xFF]).is_empty());
        let frames = splitter.push(&[0x47, 0xCC]);

        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &[0xAA, 0xBB]);
        assert_eq!(splitter.carry_len(), 1);
    }

    #[test]
    fn back_to_back_markers_produce_no_empty_frames() {
        let mut splitter = FrameSplitter::new();
        let wire = concat(&[&DELIMITER, &DELIMITER, &[0x01], &DELIMITER]);

        let frames = splitter.push(&wire);

        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &[0x01]);
    }

    #[test]
    fn multiple_frames_in_one_chunk_come_out_in_order() {
        let mut splitter = FrameSplitter::new();
        let wire = concat(&[&[0x01], &DELIMITER, &[0x02, 0x03], &DELIMITER, &[0x04]]);

        let frames = splitter.push(&wire);

        assert_eq!(frames.len(), 2);
        assert_eq!(&frames[0][..], &[0x01]);
        assert_eq!(&frames[1][..], &[0x02, 0x03]);
        assert_eq!(splitter.carry_len(), 1);
    }

    #[test]
    fn trailing_bytes_survive_across_pushes() {
        let mut splitter = FrameSplitter::new();

        assert!(splitter.push(&[0x10, 0x20]).is_empty());
        assert!(splitter.push(&[0x30]).is_empty());
        let frames = splitter.push(&DELIMITER);

        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &[0x10, 0x20, 0x30]);
    }

    #[test]
    fn carry_overflow_discards_and_counts() {
        let mut splitter = FrameSplitter::with_max_carry(8);

        assert!(splitter.push(&[0u8; 16]).is_empty());

        assert_eq!(splitter.carry_len(), 0);
        assert_eq!(splitter.overflow_count(), 1);

        // Splitter keeps working after the overflow.
        let frames = splitter.push(&concat(&[&[0x05], &DELIMITER]));
        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &[0x05]);
    }

    #[test]
    fn reset_drops_carry_but_keeps_counters() {
        let mut splitter = FrameSplitter::with_max_carry(8);
        splitter.push(&[0u8; 16]);
        splitter.push(&[0x01, 0x02]);

        splitter.reset();

        assert_eq!(splitter.carry_len(), 0);
        assert_eq!(splitter.overflow_count(), 1);

        let frames = splitter.push(&concat(&[&[0x09], &DELIMITER]));
        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &[0x09]);
    }

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn chunking_never_changes_the_frames(
                data in prop::collection::vec(any::<u8>(), 0..2048),
                raw_cuts in prop::collection::vec(0usize..2048, 0..8)
            ) {
                let mut whole = FrameSplitter::new();
                let expected = whole.push(&data);

                let mut cuts: Vec<usize> =
                    raw_cuts.into_iter().map(|c| c % (data.len() + 1)).collect();
                cuts.sort_unstable();

                let mut piecewise = FrameSplitter::new();
                let mut actual = Vec::new();
                let mut start = 0;
                for cut in cuts {
                    actual.extend(piecewise.push(&data[start..cut]));
                    start = cut;
                }
                actual.extend(piecewise.push(&data[start..]));

                prop_assert_eq!(expected, actual);
                prop_assert_eq!(whole.carry_len(), piecewise.carry_len());
            }

            #[test]
            fn emitted_frames_never_contain_a_marker(
                data in prop::collection::vec(any::<u8>(), 0..2048)
            ) {
                let mut splitter = FrameSplitter::new();
                for frame in splitter.push(&data) {
                    prop_assert!(find_delimiter(&frame).is_none());
                    prop_assert!(!frame.is_empty());
                }
            }

            #[test]
            fn a_marker_flushes_exactly_the_carried_bytes(
                data in prop::collection::vec(any::<u8>(), 0..1024)
            ) {
                let mut splitter = FrameSplitter::new();
                splitter.push(&data);
                let carried = splitter.carry_len();

                let frames = splitter.push(&DELIMITER);

                prop_assert_eq!(splitter.carry_len(), 0);
                if carried > 0 {
                    prop_assert_eq!(frames.len(), 1);
                    prop_assert_eq!(frames[0].len(), carried);
                } else {
                    prop_assert!(frames.is_empty());
                }
            }
        }
    }
}
