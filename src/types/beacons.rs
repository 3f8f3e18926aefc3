//! Stationary beacon map packets.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::PayloadReader;

/// A positioning cell uses four stationary beacons; maps announcing more
/// (submaps mid-handover) keep the first four.
pub const MAX_TRACKED_BEACONS: usize = 4;

/// Surveyed position of one stationary beacon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconPosition {
    pub address: u8,
    pub x_mm: i32,
    pub y_mm: i32,
    pub z_mm: i32,
}

/// The set of stationary beacons the modem currently announces.
///
/// Each packet is a complete re-statement of the map, so decoding one
/// replaces any previously known map wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BeaconMap {
    pub beacons: Vec<BeaconPosition>,
}

impl BeaconMap {
    /// Decodes the body of a beacon-map packet.
    ///
    /// Body layout: size `u8`, beacon count `u8`, then per beacon address
    /// `u8`, x/y/z `i32`, reserved `u8`. Every announced entry must be fully
    /// present: a count that overruns the body rejects the whole packet.
    /// Of the entries decoded, only the first [`MAX_TRACKED_BEACONS`] are
    /// retained.
    pub(crate) fn decode(reader: &mut PayloadReader<'_>) -> Result<Self> {
        reader.skip(1)?; // declared size
        let count = reader.read_u8()?;

        let mut beacons = Vec::with_capacity(usize::from(count).min(MAX_TRACKED_BEACONS));
        for _ in 0..count {
            let address = reader.read_u8()?;
            let x_mm = reader.read_i32()?;
            let y_mm = reader.read_i32()?;
            let z_mm = reader.read_i32()?;
            reader.skip(1)?; // reserved

            if beacons.len() < MAX_TRACKED_BEACONS {
                beacons.push(BeaconPosition { address, x_mm, y_mm, z_mm });
            }
        }

        Ok(Self { beacons })
    }

    /// Looks up a beacon by network address.
    pub fn beacon(&self, address: u8) -> Option<&BeaconPosition> {
        self.beacons.iter().find(|b| b.address == address)
    }
}
