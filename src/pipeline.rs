//! Synchronous decode pipeline: byte chunks in, typed events out.
//!
//! [`DecodePipeline`] glues the [`FrameSplitter`](crate::framing::FrameSplitter)
//! to the packet decoders and a [`DeviceStateStore`]. Each call to
//! [`feed`](DecodePipeline::feed) advances the stream by one chunk: frames
//! completed by the chunk are decoded in wire order, every decoded packet is
//! written to the store, and the same packets come back as events.
//!
//! The pipeline never fails as a whole. Malformed frames and unrecognized
//! packet codes are dropped individually, counted in [`DecodeStats`], and the
//! stream continues at the next frame marker.
//!
//! ```rust
//! use hedgelink::{DecodePipeline, DeviceStateStore};
//! use hedgelink::framing::DELIMITER;
//!
//! let mut pipeline = DecodePipeline::new();
//! let mut store = DeviceStateStore::new();
//!
//! // A quality packet for hedgehog 6, marker-terminated.
//! let mut chunk = vec![0x07, 0x00, 0x03, 6, 87, 0];
//! chunk.extend_from_slice(&DELIMITER);
//!
//! let events = pipeline.feed(&chunk, &mut store);
//! assert_eq!(events.len(), 1);
//! assert_eq!(store.quality(6).unwrap().quality_percent, 87);
//! ```

use serde::Serialize;
use tracing::{debug, trace};

use crate::framing::FrameSplitter;
use crate::store::DeviceStateStore;
use crate::types::TelemetryEvent;

/// Counters describing what the pipeline has seen since creation.
///
/// Counters only ever grow; `reset` does not clear them. The quiet-discard
/// policy for unknown codes and corrupt frames makes these the only witness
/// that discarding happened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecodeStats {
    /// Chunks fed to the pipeline.
    pub chunks: u64,
    /// Non-empty frames produced by the splitter, decoded or not.
    pub frames: u64,
    /// Frames decoded into events and written to the store.
    pub records: u64,
    /// Frames dropped for frame-local decode errors.
    pub malformed: u64,
    /// Frames skipped because their packet code is unknown.
    pub unrecognized: u64,
    /// Carry-over discards after the bound was exceeded.
    pub overflows: u64,
}

/// Stateful decoder for one telemetry byte stream.
#[derive(Debug)]
pub struct DecodePipeline {
    splitter: FrameSplitter,
    stats: DecodeStats,
    paused: bool,
}

impl DecodePipeline {
    /// Creates a pipeline with the default carry bound.
    pub fn new() -> Self {
        Self { splitter: FrameSplitter::new(), stats: DecodeStats::default(), paused: false }
    }

    /// Creates a pipeline with an explicit carry bound.
    pub fn with_max_carry(max_carry: usize) -> Self {
        Self {
            splitter: FrameSplitter::with_max_carry(max_carry),
            stats: DecodeStats::default(),
            paused: false,
        }
    }

    /// Feeds one chunk, writes decoded packets to `store`, and returns them
    /// as events in wire order.
    pub fn feed(&mut self, chunk: &[u8], store: &mut DeviceStateStore) -> Vec<TelemetryEvent> {
        self.stats.chunks += 1;
        let frames = self.splitter.push(chunk);
        self.stats.frames += frames.len() as u64;

        if self.paused {
            trace!(dropped = frames.len(), "paused, dropping completed frames");
            return Vec::new();
        }

        let mut events = Vec::with_capacity(frames.len());
        for frame in frames {
            match TelemetryEvent::decode(&frame) {
                Ok(Some(event)) => {
                    store.apply(&event);
                    self.stats.records += 1;
                    trace!(
                        kind = %event.kind(),
                        address = ?event.device_address(),
                        "decoded packet"
                    );
                    events.push(event);
                }
                Ok(None) => {
                    self.stats.unrecognized += 1;
                    let code = u16::from_le_bytes([frame[0], frame[1]]);
                    debug!(code, len = frame.len(), "skipping unrecognized packet code");
                }
                Err(error) => {
                    self.stats.malformed += 1;
                    debug!(%error, len = frame.len(), "dropping malformed frame");
                }
            }
        }
        events
    }

    /// Discards the carry-over buffer after a stream discontinuity.
    pub fn reset(&mut self) {
        self.splitter.reset();
    }

    /// While paused, chunks still advance frame alignment but no frame is
    /// decoded and no store write happens.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Counters up to now, overflow count included.
    pub fn stats(&self) -> DecodeStats {
        let mut stats = self.stats;
        stats.overflows = self.splitter.overflow_count();
        stats
    }

    /// Bytes currently carried waiting for a frame marker.
    pub fn carry_len(&self) -> usize {
        self.splitter.carry_len()
    }
}

impl Default for DecodePipeline {
    fn default() -> Self {
        Self::new()
    }
}
