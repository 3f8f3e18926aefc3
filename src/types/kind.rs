//! Packet classification by wire code.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The packet kinds this crate decodes.
///
/// The first two bytes of every frame form a little-endian code; these are
/// the codes the modem emits for the data sets we track. Codes outside this
/// set are not errors: newer firmware adds kinds, and unknown frames are
/// skipped so a decoder built today keeps working against tomorrow's modem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PacketKind {
    /// Raw hedgehog-to-beacon ultrasonic distances (code `0x0004`).
    RawDistances,
    /// Battery voltage and radio signal strength (code `0x0006`).
    Telemetry,
    /// Positioning quality and geofencing state (code `0x0007`).
    Quality,
    /// Millimeter-resolution hedgehog position (code `0x0011`).
    HedgehogPosition,
    /// Coordinates of the stationary beacons (code `0x0012`).
    BeaconMap,
}

impl PacketKind {
    /// Classifies a wire code, `None` for codes this crate does not know.
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            0x0004 => Some(PacketKind::RawDistances),
            0x0006 => Some(PacketKind::Telemetry),
            0x0007 => Some(PacketKind::Quality),
            0x0011 => Some(PacketKind::HedgehogPosition),
            0x0012 => Some(PacketKind::BeaconMap),
            _ => None,
        }
    }

    /// The little-endian code this kind is written as on the wire.
    pub const fn code(self) -> u16 {
        match self {
            PacketKind::RawDistances => 0x0004,
            PacketKind::Telemetry => 0x0006,
            PacketKind::Quality => 0x0007,
            PacketKind::HedgehogPosition => 0x0011,
            PacketKind::BeaconMap => 0x0012,
        }
    }

    /// The data-set label the modem documentation uses for this kind.
    pub const fn description(self) -> &'static str {
        match self {
            PacketKind::RawDistances => "Beacon Distances (mm)",
            PacketKind::Telemetry => "Battery (mV) and RSSI (dBm)",
            PacketKind::Quality => "Quality Parameter (%)",
            PacketKind::HedgehogPosition => "Hedgehog Coordinates (mm)",
            PacketKind::BeaconMap => "Beacons Coordinates (mm)",
        }
    }

    /// All kinds, in wire-code order.
    pub const ALL: [PacketKind; 5] = [
        PacketKind::RawDistances,
        PacketKind::Telemetry,
        PacketKind::Quality,
        PacketKind::HedgehogPosition,
        PacketKind::BeaconMap,
    ];
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PacketKind::RawDistances => "raw distances",
            PacketKind::Telemetry => "telemetry",
            PacketKind::Quality => "quality",
            PacketKind::HedgehogPosition => "hedgehog position",
            PacketKind::BeaconMap => "beacon map",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_classify() {
        assert_eq!(PacketKind::from_code(4), Some(PacketKind::RawDistances));
        assert_eq!(PacketKind::from_code(6), Some(PacketKind::Telemetry));
        assert_eq!(PacketKind::from_code(7), Some(PacketKind::Quality));
        assert_eq!(PacketKind::from_code(17), Some(PacketKind::HedgehogPosition));
        assert_eq!(PacketKind::from_code(18), Some(PacketKind::BeaconMap));
    }

    #[test]
    fn unknown_codes_are_none() {
        assert_eq!(PacketKind::from_code(0), None);
        assert_eq!(PacketKind::from_code(1), None);
        assert_eq!(PacketKind::from_code(99), None);
        assert_eq!(PacketKind::from_code(0xFFFF), None);
    }

    #[test]
    fn display_names_are_stable() {
        assert_eq!(PacketKind::HedgehogPosition.to_string(), "hedgehog position");
        assert_eq!(PacketKind::BeaconMap.to_string(), "beacon map");
    }

    #[test]
    fn descriptions_use_the_modem_labels() {
        assert_eq!(PacketKind::HedgehogPosition.description(), "Hedgehog Coordinates (mm)");
        assert_eq!(PacketKind::Telemetry.description(), "Battery (mV) and RSSI (dBm)");
        assert_eq!(PacketKind::RawDistances.description(), "Beacon Distances (mm)");
    }

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn classification_round_trips(code in any::<u16>()) {
                match PacketKind::from_code(code) {
                    Some(kind) => prop_assert_eq!(kind.code(), code),
                    None => prop_assert!(
                        PacketKind::ALL.iter().all(|k| k.code() != code)
                    ),
                }
            }
        }
    }
}
