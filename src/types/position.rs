//! Hedgehog (mobile beacon) position packets.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::PayloadReader;

/// Millimeter-resolution position of one hedgehog.
///
/// Coordinates are signed offsets from the map origin the dashboard
/// configured; hedgehogs below or left of the origin report negative values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HedgehogPosition {
    /// Network address of the hedgehog this fix belongs to.
    pub address: u8,
    pub x_mm: i32,
    pub y_mm: i32,
    pub z_mm: i32,
}

impl HedgehogPosition {
    /// Decodes the body of a hedgehog-position packet.
    ///
    /// Body layout: size `u8`, device timestamp `u32`, x/y/z `i32`, flags
    /// `u8`, address `u8`, orientation `u16`. Only the address and the
    /// coordinates are exposed; the rest is dashboard-internal state.
    pub(crate) fn decode(reader: &mut PayloadReader<'_>) -> Result<Self> {
        reader.skip(1)?; // declared size
        reader.skip(4)?; // device-local timestamp
        let x_mm = reader.read_i32()?;
        let y_mm = reader.read_i32()?;
        let z_mm = reader.read_i32()?;
        reader.skip(1)?; // flags
        let address = reader.read_u8()?;
        reader.skip(2)?; // orientation

        Ok(Self { address, x_mm, y_mm, z_mm })
    }
}
