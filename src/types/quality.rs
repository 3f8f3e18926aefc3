//! Positioning quality packets.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::PayloadReader;

/// Positioning quality and geofencing state for one hedgehog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReading {
    pub hedgehog_address: u8,
    /// Solver confidence, 0..=100.
    pub quality_percent: u8,
    /// Zone the hedgehog has strayed into; zero means no alarm.
    pub geofencing_zone: u8,
}

impl QualityReading {
    /// Decodes the body of a quality packet: size `u8`, hedgehog address
    /// `u8`, quality `u8`, geofencing zone `u8`.
    pub(crate) fn decode(reader: &mut PayloadReader<'_>) -> Result<Self> {
        reader.skip(1)?; // declared size
        let hedgehog_address = reader.read_u8()?;
        let quality_percent = reader.read_u8()?;
        let geofencing_zone = reader.read_u8()?;

        Ok(Self { hedgehog_address, quality_percent, geofencing_zone })
    }

    /// Whether the geofencing alarm is raised.
    pub fn geofencing_alarm(&self) -> bool {
        self.geofencing_zone != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PacketKind;

    fn decode(body: &[u8]) -> Result<QualityReading> {
        let mut reader = PayloadReader::new(PacketKind::Quality, body);
        QualityReading::decode(&mut reader)
    }

    #[test]
    fn decodes_quality_and_zone() {
        let reading = decode(&[0x02, 6, 87, 0]).unwrap();

        assert_eq!(
            reading,
            QualityReading { hedgehog_address: 6, quality_percent: 87, geofencing_zone: 0 }
        );
        assert!(!reading.geofencing_alarm());
    }

    #[test]
    fn nonzero_zone_raises_the_alarm() {
        let reading = decode(&[0x02, 6, 55, 3]).unwrap();

        assert_eq!(reading.geofencing_zone, 3);
        assert!(reading.geofencing_alarm());
    }

    #[test]
    fn three_byte_body_is_truncated() {
        assert!(decode(&[0x02, 6, 87]).is_err());
    }
}
