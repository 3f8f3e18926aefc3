//! Replay source for captured modem output.

use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use tracing::info;

use crate::source::ChunkSource;
use crate::Result;

/// Default replay chunk size, sized like a typical serial read.
const DEFAULT_CHUNK_SIZE: usize = 64;

/// Replays a captured byte stream as if it were arriving from a modem.
///
/// The capture is served in fixed-size chunks so downstream code sees the
/// same mid-packet boundaries a real transport produces. An optional pace
/// delay between chunks approximates line rate for soak testing; without it
/// the capture is served as fast as the consumer reads.
pub struct ReplaySource {
    data: Bytes,
    offset: usize,
    chunk_size: usize,
    pace: Option<Duration>,
}

impl ReplaySource {
    /// Replays an in-memory capture.
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self { data: data.into(), offset: 0, chunk_size: DEFAULT_CHUNK_SIZE, pace: None }
    }

    /// Replays a capture file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        info!(path = %path.display(), bytes = data.len(), "opened capture for replay");
        Ok(Self::from_bytes(data))
    }

    /// Sets the chunk size (minimum 1).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Delays each chunk by `pace` to approximate line rate.
    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = Some(pace);
        self
    }

    /// Bytes not yet served.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }
}

#[async_trait::async_trait]
impl ChunkSource for ReplaySource {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        if self.offset >= self.data.len() {
            return Ok(None);
        }

        if let Some(pace) = self.pace {
            tokio::time::sleep(pace).await;
        }

        let end = (self.offset + self.chunk_size).min(self.data.len());
        let chunk = self.data.slice(self.offset..end);
        self.offset = end;
        Ok(Some(chunk))
    }
}
