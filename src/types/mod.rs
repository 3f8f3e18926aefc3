//! Core types for decoded telemetry data.
//!
//! Everything the wire carries maps to a plain data struct here, one module
//! per packet kind:
//!
//! - [`HedgehogPosition`]: millimeter position fixes for mobile beacons
//! - [`BeaconMap`]: the surveyed positions of the stationary beacons
//! - [`RawDistanceSet`]: the ultrasonic distances behind a fix
//! - [`QualityReading`]: solver confidence and geofencing state
//! - [`TelemetryReading`]: battery voltage and radio signal strength
//!
//! [`TelemetryEvent`] wraps one decoded packet of any kind and is the unit
//! the pipeline emits. [`PacketKind`] classifies raw wire codes, and
//! [`PayloadReader`] is the bounds-checked cursor the decoders share.
//!
//! All data types derive `Serialize`/`Deserialize` so decoded telemetry can
//! be logged, replayed, or forwarded as JSON without wrapper types.

mod beacons;
mod distances;
mod event;
mod kind;
mod payload;
mod position;
mod quality;
mod telemetry;

pub use beacons::{BeaconMap, BeaconPosition, MAX_TRACKED_BEACONS};
pub use distances::{BeaconDistance, RawDistanceSet, DISTANCE_SLOTS};
pub use event::TelemetryEvent;
pub use kind::PacketKind;
pub use payload::PayloadReader;
pub use position::HedgehogPosition;
pub use quality::QualityReading;
pub use telemetry::TelemetryReading;
