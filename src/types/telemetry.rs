//! Battery and radio telemetry packets.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::PayloadReader;

/// Battery voltage and radio signal strength for one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryReading {
    /// Device the reading belongs to (hedgehog or stationary beacon).
    pub device_address: u8,
    pub battery_mv: u16,
    /// RSSI byte as the radio reports it: the two's-complement encoding of a
    /// dBm figure, passed through unconverted.
    pub rssi_dbm: u8,
}

impl TelemetryReading {
    /// Decodes the body of a telemetry packet: size `u8`, battery millivolts
    /// `u16`, RSSI `u8`, device address `u8`.
    pub(crate) fn decode(reader: &mut PayloadReader<'_>) -> Result<Self> {
        reader.skip(1)?; // declared size
        let battery_mv = reader.read_u16()?;
        let rssi_dbm = reader.read_u8()?;
        let device_address = reader.read_u8()?;

        Ok(Self { device_address, battery_mv, rssi_dbm })
    }
}
