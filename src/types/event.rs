//! Decoded packets as typed events.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TelemetryError};
use crate::types::{
    BeaconMap, HedgehogPosition, PacketKind, PayloadReader, QualityReading, RawDistanceSet,
    TelemetryReading,
};

/// One successfully decoded packet.
///
/// Events come out of the decode pipeline in wire order, one per packet, and
/// mirror exactly what was written to the [`DeviceStateStore`](crate::DeviceStateStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    Position(HedgehogPosition),
    Beacons(BeaconMap),
    Distances(RawDistanceSet),
    Quality(QualityReading),
    Telemetry(TelemetryReading),
}

impl TelemetryEvent {
    /// Decodes one frame (delimiter to delimiter, markers excluded).
    ///
    /// Returns `Ok(None)` when the frame carries a packet code this crate
    /// does not know; such frames are skipped, not failed, so unknown kinds
    /// from newer firmware pass through harmlessly. Frames shorter than the
    /// 2-byte code, or classified frames with too little body, are errors.
    pub fn decode(frame: &[u8]) -> Result<Option<Self>> {
        if frame.len() < 2 {
            return Err(TelemetryError::short_frame(frame.len()));
        }

        let code = u16::from_le_bytes([frame[0], frame[1]]);
        let Some(kind) = PacketKind::from_code(code) else {
            return Ok(None);
        };

        let mut reader = PayloadReader::new(kind, &frame[2..]);
        let event = match kind {
            PacketKind::HedgehogPosition => {
                TelemetryEvent::Position(HedgehogPosition::decode(&mut reader)?)
            }
            PacketKind::BeaconMap => TelemetryEvent::Beacons(BeaconMap::decode(&mut reader)?),
            PacketKind::RawDistances => {
                TelemetryEvent::Distances(RawDistanceSet::decode(&mut reader)?)
            }
            PacketKind::Quality => TelemetryEvent::Quality(QualityReading::decode(&mut reader)?),
            PacketKind::Telemetry => {
                TelemetryEvent::Telemetry(TelemetryReading::decode(&mut reader)?)
            }
        };
        Ok(Some(event))
    }

    /// The packet kind this event was decoded from.
    pub fn kind(&self) -> PacketKind {
        match self {
            TelemetryEvent::Position(_) => PacketKind::HedgehogPosition,
            TelemetryEvent::Beacons(_) => PacketKind::BeaconMap,
            TelemetryEvent::Distances(_) => PacketKind::RawDistances,
            TelemetryEvent::Quality(_) => PacketKind::Quality,
            TelemetryEvent::Telemetry(_) => PacketKind::Telemetry,
        }
    }

    /// The device address the event is keyed by, when it has one.
    ///
    /// Beacon maps describe the whole cell and return `None`.
    pub fn device_address(&self) -> Option<u8> {
        match self {
            TelemetryEvent::Position(p) => Some(p.address),
            TelemetryEvent::Beacons(_) => None,
            TelemetryEvent::Distances(d) => Some(d.hedgehog_address),
            TelemetryEvent::Quality(q) => Some(q.hedgehog_address),
            TelemetryEvent::Telemetry(t) => Some(t.device_address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{position_packet, quality_packet};

    #[test]
    fn decodes_a_classified_frame() {
        let frame = position_packet(5, 100, 200, 300);

        let event = TelemetryEvent::decode(&frame).unwrap().unwrap();

        assert_eq!(event.kind(), PacketKind::HedgehogPosition);
        assert_eq!(event.device_address(), Some(5));
        match event {
            TelemetryEvent::Position(p) => {
                assert_eq!((p.x_mm, p.y_mm, p.z_mm), (100, 200, 300));
            }
            other => panic!("expected Position, got {other:?}"),
        }
    }

    #[test]
    fn unknown_code_is_skipped_not_failed() {
        let frame = [99u8, 0, 1, 2, 3, 4];

        assert_eq!(TelemetryEvent::decode(&frame).unwrap(), None);
    }

    #[test]
    fn one_byte_frame_is_an_error() {
        let err = TelemetryEvent::decode(&[0x11]).unwrap_err();
        assert!(matches!(err, TelemetryError::ShortFrame { len: 1 }));
    }

    #[test]
    fn empty_frame_is_an_error() {
        assert!(TelemetryEvent::decode(&[]).is_err());
    }

    #[test]
    fn classified_frame_with_short_body_fails() {
        let frame = quality_packet(6, 87, 0);

        let err = TelemetryEvent::decode(&frame[..frame.len() - 1]).unwrap_err();

        assert!(matches!(err, TelemetryError::Truncated { kind: PacketKind::Quality, .. }));
    }

    #[test]
    fn code_is_read_little_endian() {
        // 0x0011 split across the two bytes: low byte first.
        let frame = position_packet(1, 0, 0, 0);
        assert_eq!(frame[0], 0x11);
        assert_eq!(frame[1], 0x00);
    }
}
