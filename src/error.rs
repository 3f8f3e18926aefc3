//! Error types for telemetry stream decoding.
//!
//! The decode path distinguishes two failure scopes:
//!
//! - **Frame-local errors** (`Truncated`, `ShortFrame`): one frame on the wire
//!   was unusable. Policy is to drop that frame, leave the device state store
//!   untouched, and keep decoding; a single corrupt frame never stops the
//!   stream.
//! - **Stream-level errors** (`Source`): the chunk source itself failed. The
//!   carry-over buffer is discarded and no further frames are produced until
//!   the source recovers.
//!
//! Unknown packet codes are deliberately *not* errors: the modem may emit
//! packet kinds this crate does not know, and those frames are discarded
//! silently (visible only through [`DecodeStats`](crate::DecodeStats) and
//! debug logging).
//!
//! ```rust
//! use hedgelink::TelemetryError;
//!
//! let error = TelemetryError::short_frame(1);
//! assert!(error.is_frame_local());
//! ```

use thiserror::Error;

use crate::types::PacketKind;

/// Result type alias for telemetry operations.
pub type Result<T, E = TelemetryError> = std::result::Result<T, E>;

/// Main error type for telemetry stream decoding.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TelemetryError {
    /// A classified packet is shorter than its fixed layout requires, or a
    /// length-prefixed repetition overruns the packet.
    #[error("{kind} packet truncated: layout needs {needed} bytes, payload has {got}")]
    Truncated { kind: PacketKind, needed: usize, got: usize },

    /// A frame too short to carry the 2-byte packet code.
    #[error("frame too short to classify ({len} bytes)")]
    ShortFrame { len: usize },

    /// The chunk source reported a transport failure.
    #[error("chunk source failed: {reason}")]
    Source {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl TelemetryError {
    /// Returns whether this error is confined to a single frame.
    ///
    /// Frame-local errors drop exactly one frame; the decode pipeline
    /// continues with the next delimiter boundary. Stream-level errors
    /// invalidate the carry-over buffer as well.
    pub fn is_frame_local(&self) -> bool {
        match self {
            TelemetryError::Truncated { .. } => true,
            TelemetryError::ShortFrame { .. } => true,
            TelemetryError::Source { .. } => false,
        }
    }

    /// Helper constructor for truncated-packet errors.
    pub fn truncated(kind: PacketKind, needed: usize, got: usize) -> Self {
        TelemetryError::Truncated { kind, needed, got }
    }

    /// Helper constructor for frames too short to classify.
    pub fn short_frame(len: usize) -> Self {
        TelemetryError::ShortFrame { len }
    }

    /// Helper constructor for chunk source failures.
    pub fn source_failed(reason: impl Into<String>) -> Self {
        TelemetryError::Source { reason: reason.into(), source: None }
    }

    /// Helper constructor for chunk source failures with an underlying cause.
    pub fn source_failed_with(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        TelemetryError::Source { reason: reason.into(), source: Some(source) }
    }
}

// Chunk sources typically sit on top of serial or socket I/O.
impl From<std::io::Error> for TelemetryError {
    fn from(err: std::io::Error) -> Self {
        TelemetryError::Source { reason: err.to_string(), source: Some(Box::new(err)) }
    }
}
