//! Wire-image builders shared by tests and benchmarks.
//!
//! Each builder produces one complete frame (packet code plus body, no frame
//! markers); [`wire`] joins frames into the byte stream a modem would emit.

#![cfg(any(test, feature = "benchmark"))]

use crate::framing::DELIMITER;
use crate::types::PacketKind;

/// Builds a hedgehog-position frame with zeroed timestamp, flags and
/// orientation.
pub fn position_packet(address: u8, x_mm: i32, y_mm: i32, z_mm: i32) -> Vec<u8> {
    position_packet_full(0, x_mm, y_mm, z_mm, 0, address, 0)
}

/// Builds a hedgehog-position frame with every wire field spelled out.
pub fn position_packet_full(
    timestamp: u32,
    x_mm: i32,
    y_mm: i32,
    z_mm: i32,
    flags: u8,
    address: u8,
    orientation: u16,
) -> Vec<u8> {
    let mut frame = PacketKind::HedgehogPosition.code().to_le_bytes().to_vec();
    frame.push(0x16); // declared size
    frame.extend_from_slice(&timestamp.to_le_bytes());
    frame.extend_from_slice(&x_mm.to_le_bytes());
    frame.extend_from_slice(&y_mm.to_le_bytes());
    frame.extend_from_slice(&z_mm.to_le_bytes());
    frame.push(flags);
    frame.push(address);
    frame.extend_from_slice(&orientation.to_le_bytes());
    frame
}

/// Builds a beacon-map frame announcing the given beacons.
pub fn beacon_map_packet(beacons: &[(u8, i32, i32, i32)]) -> Vec<u8> {
    let mut frame = PacketKind::BeaconMap.code().to_le_bytes().to_vec();
    frame.push((1 + beacons.len() * 14) as u8); // declared size
    frame.push(beacons.len() as u8);
    for &(address, x_mm, y_mm, z_mm) in beacons {
        frame.push(address);
        frame.extend_from_slice(&x_mm.to_le_bytes());
        frame.extend_from_slice(&y_mm.to_le_bytes());
        frame.extend_from_slice(&z_mm.to_le_bytes());
        frame.push(0x00); // reserved
    }
    frame
}

/// Builds a raw-distances frame, footer included.
pub fn raw_distances_packet(hedgehog_address: u8, slots: [(u8, u32, u8); 4]) -> Vec<u8> {
    let mut frame = PacketKind::RawDistances.code().to_le_bytes().to_vec();
    frame.push(0x20); // declared size
    frame.push(hedgehog_address);
    for (beacon, distance_mm, flag) in slots {
        frame.push(beacon);
        frame.extend_from_slice(&distance_mm.to_le_bytes());
        frame.push(flag);
    }
    frame.extend_from_slice(&0u32.to_le_bytes()); // device timestamp
    frame.extend_from_slice(&0u16.to_le_bytes()); // time delta
    frame
}

/// Builds a quality frame.
pub fn quality_packet(hedgehog_address: u8, quality_percent: u8, geofencing_zone: u8) -> Vec<u8> {
    let mut frame = PacketKind::Quality.code().to_le_bytes().to_vec();
    frame.extend_from_slice(&[0x03, hedgehog_address, quality_percent, geofencing_zone]);
    frame
}

/// Builds a battery/RSSI telemetry frame.
pub fn telemetry_packet(device_address: u8, battery_mv: u16, rssi_dbm: u8) -> Vec<u8> {
    let mut frame = PacketKind::Telemetry.code().to_le_bytes().to_vec();
    frame.push(0x04); // declared size
    frame.extend_from_slice(&battery_mv.to_le_bytes());
    frame.push(rssi_dbm);
    frame.push(device_address);
    frame
}

/// Builds a frame with an arbitrary packet code, for unknown-kind coverage.
pub fn unknown_packet(code: u16, body: &[u8]) -> Vec<u8> {
    let mut frame = code.to_le_bytes().to_vec();
    frame.extend_from_slice(body);
    frame
}

/// Joins frames into a modem byte stream, each frame marker-terminated.
pub fn wire(frames: &[Vec<u8>]) -> Vec<u8> {
    let mut stream = Vec::new();
    for frame in frames {
        stream.extend_from_slice(frame);
        stream.extend_from_slice(&DELIMITER);
    }
    stream
}
