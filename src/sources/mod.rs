//! Built-in chunk sources.
//!
//! Serial transports vary too much across platforms to bundle one here;
//! implement [`ChunkSource`](crate::ChunkSource) over your serial crate of
//! choice and hand it to [`Connection::attach`](crate::Connection::attach).
//! What ships built-in is [`ReplaySource`], which replays captured modem
//! output for offline decoding and tests.

mod replay;

pub use replay::ReplaySource;
