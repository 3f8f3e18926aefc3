//! Chunk source trait for byte transports.

use bytes::Bytes;

use crate::Result;

/// Trait for raw byte transports feeding the decoder.
///
/// Sources abstract over wherever modem bytes come from (a serial port, a
/// TCP bridge, a recorded capture) and hand them over in whatever chunk
/// sizes the transport produces. Chunk boundaries carry no meaning; the
/// decode pipeline reassembles frames across them.
///
/// Implementations must make `next_chunk` cancel-safe: the driver races it
/// against shutdown and control commands, and a dropped call must not lose
/// bytes that were not returned.
#[async_trait::async_trait]
pub trait ChunkSource: Send + 'static {
    /// Get the next chunk of stream bytes.
    ///
    /// Returns:
    /// - `Ok(Some(bytes))` - More stream data, possibly mid-packet
    /// - `Ok(None)` - Stream ended (normal termination)
    /// - `Err(e)` - Transport fault; the driver resets framing state and
    ///   retries with backoff
    async fn next_chunk(&mut self) -> Result<Option<Bytes>>;
}
