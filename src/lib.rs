//! Type-safe Rust decoder for Marvelmind indoor-positioning telemetry.
//!
//! Hedgelink turns the raw byte stream a Marvelmind modem emits over its
//! serial link into typed packets: millimeter position fixes for mobile
//! beacons ("hedgehogs"), the stationary beacon map, raw ultrasonic
//! distances, positioning quality, and battery/RSSI telemetry.
//!
//! # Features
//!
//! - **Stream decoding**: frames are reassembled across arbitrary chunk
//!   boundaries, so bytes can be fed exactly as the transport delivers them
//! - **Typed packets**: every data set decodes into a plain serde-ready
//!   struct; corrupt frames and unknown packet codes are dropped without
//!   stopping the stream
//! - **Latest-value store**: the current state of every device is one lookup
//!   away, no packet bookkeeping required
//! - **Async fan-out**: a driver task owns the transport and broadcasts
//!   events, state snapshots and link status to any number of consumers
//! - **Offline replay**: captured modem output replays through the same
//!   pipeline for analysis and tests
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use hedgelink::{Hedgelink, TelemetryEvent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let connection = Hedgelink::replay("modem-capture.bin")?;
//!     let mut events = connection.events();
//!
//!     while let Some(event) = events.next().await {
//!         if let TelemetryEvent::Position(fix) = event {
//!             println!(
//!                 "hedgehog {} at ({}, {}, {}) mm",
//!                 fix.address, fix.x_mm, fix.y_mm, fix.z_mm
//!             );
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Live use looks the same: implement [`ChunkSource`] over your serial
//! transport and hand it to [`Hedgelink::attach`].

// Core decoding
mod error;
pub mod framing;
pub mod pipeline;
pub mod store;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Stream-based decoding architecture
pub mod connection;
pub mod driver;
pub mod source;
pub mod sources;

// Core exports
pub use error::*;
pub use types::*;

// Pipeline exports
pub use pipeline::{DecodePipeline, DecodeStats};
pub use store::DeviceStateStore;

// Main API exports
pub use connection::Connection;
pub use driver::{Driver, DriverChannels, DriverCommand, DriverConfig, LinkStatus, ResetPolicy};
pub use source::ChunkSource;
pub use sources::ReplaySource;

/// Unified entry point for hedgelink decoding sessions.
///
/// This factory provides a consistent API for attaching the decoder to a
/// live transport or to a recorded capture.
///
/// # Examples
///
/// ## Custom transport
/// ```rust,no_run
/// use hedgelink::{ChunkSource, Hedgelink};
/// # struct MySerialSource;
/// # #[async_trait::async_trait]
/// # impl ChunkSource for MySerialSource {
/// #     async fn next_chunk(&mut self) -> hedgelink::Result<Option<bytes::Bytes>> { Ok(None) }
/// # }
///
/// #[tokio::main]
/// async fn main() {
///     let connection = Hedgelink::attach(MySerialSource);
///     connection.until_closed().await;
/// }
/// ```
///
/// ## Recorded capture
/// ```rust,no_run
/// use hedgelink::Hedgelink;
///
/// #[tokio::main]
/// async fn main() -> hedgelink::Result<()> {
///     let connection = Hedgelink::replay("modem-capture.bin")?;
///     connection.until_closed().await;
///     Ok(())
/// }
/// ```
pub struct Hedgelink;

impl Hedgelink {
    /// Attach the decoder to a chunk source.
    ///
    /// Spawns the decoding task immediately, so this must be called from
    /// within a Tokio runtime.
    pub fn attach<S: ChunkSource>(source: S) -> Connection {
        Connection::attach(source)
    }

    /// Replay a captured modem byte stream.
    ///
    /// The capture is decoded through the same pipeline a live transport
    /// feeds, as fast as consumers read it.
    ///
    /// # Errors
    ///
    /// Returns an error if the capture file cannot be read.
    pub fn replay<P: AsRef<std::path::Path>>(path: P) -> Result<Connection> {
        let source = ReplaySource::open(path)?;
        Ok(Connection::attach(source))
    }
}
