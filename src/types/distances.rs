//! Raw ultrasonic distance packets.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::PayloadReader;

/// Distance packets always carry one slot per beacon in the cell.
pub const DISTANCE_SLOTS: usize = 4;

/// One hedgehog-to-beacon distance measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconDistance {
    /// Stationary beacon the ultrasonic pulse was measured against.
    pub beacon_address: u8,
    pub distance_mm: u32,
    /// Whether the solver used this measurement. The wire flag's low bit is
    /// set when the measurement was rejected (echo, obstruction).
    pub applicable: bool,
}

impl BeaconDistance {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self> {
        let beacon_address = reader.read_u8()?;
        let distance_mm = reader.read_u32()?;
        let flag = reader.read_u8()?;

        Ok(Self { beacon_address, distance_mm, applicable: flag % 2 == 0 })
    }
}

/// The four raw distances behind one hedgehog's position fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDistanceSet {
    /// Hedgehog the measurements belong to.
    pub hedgehog_address: u8,
    pub distances: [BeaconDistance; DISTANCE_SLOTS],
}

impl RawDistanceSet {
    /// Decodes the body of a raw-distances packet.
    ///
    /// Body layout: size `u8`, hedgehog address `u8`, then four slots of
    /// beacon address `u8`, distance `u32`, flag `u8`. The body ends with a
    /// device timestamp and time delta which are left unread.
    pub(crate) fn decode(reader: &mut PayloadReader<'_>) -> Result<Self> {
        reader.skip(1)?; // declared size
        let hedgehog_address = reader.read_u8()?;
        let distances = [
            BeaconDistance::decode(reader)?,
            BeaconDistance::decode(reader)?,
            BeaconDistance::decode(reader)?,
            BeaconDistance::decode(reader)?,
        ];

        Ok(Self { hedgehog_address, distances })
    }

    /// Iterates the measurements the solver actually used.
    pub fn applicable(&self) -> impl Iterator<Item = &BeaconDistance> {
        self.distances.iter().filter(|d| d.applicable)
    }

    /// Looks up the measurement against a given stationary beacon.
    pub fn distance_to(&self, beacon_address: u8) -> Option<&BeaconDistance> {
        self.distances.iter().find(|d| d.beacon_address == beacon_address)
    }
}
