//! Latest-value store for decoded telemetry.
//!
//! The wire protocol is a rolling broadcast: every packet re-states the
//! current value of one data set, so consumers almost always want "the
//! latest X for device N" rather than the packet history.
//! [`DeviceStateStore`] keeps exactly that: one slot per data set per
//! device address, overwritten on every decode. Nothing is ever deleted; a
//! device that stops transmitting keeps its last known values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{
    BeaconMap, HedgehogPosition, QualityReading, RawDistanceSet, TelemetryEvent, TelemetryReading,
};

/// Latest decoded value of every data set, keyed by device address.
///
/// The beacon map is cell-wide and replaced wholesale; everything else is
/// per-address. The store is plain data: the async layer publishes snapshots
/// of it, and it serializes cleanly for state dumps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceStateStore {
    positions: HashMap<u8, HedgehogPosition>,
    beacon_map: Option<BeaconMap>,
    distances: HashMap<u8, RawDistanceSet>,
    quality: HashMap<u8, QualityReading>,
    telemetry: HashMap<u8, TelemetryReading>,
}

impl DeviceStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one decoded event into its slot, replacing the previous value.
    pub fn apply(&mut self, event: &TelemetryEvent) {
        match event {
            TelemetryEvent::Position(position) => {
                self.positions.insert(position.address, *position);
            }
            TelemetryEvent::Beacons(map) => {
                self.beacon_map = Some(map.clone());
            }
            TelemetryEvent::Distances(set) => {
                self.distances.insert(set.hedgehog_address, *set);
            }
            TelemetryEvent::Quality(reading) => {
                self.quality.insert(reading.hedgehog_address, *reading);
            }
            TelemetryEvent::Telemetry(reading) => {
                self.telemetry.insert(reading.device_address, *reading);
            }
        }
    }

    /// Latest position fix for a hedgehog.
    pub fn position(&self, address: u8) -> Option<&HedgehogPosition> {
        self.positions.get(&address)
    }

    /// Every hedgehog with a known position, in no particular order.
    pub fn positions(&self) -> impl Iterator<Item = &HedgehogPosition> {
        self.positions.values()
    }

    /// The stationary beacon map, once one has been announced.
    pub fn beacon_map(&self) -> Option<&BeaconMap> {
        self.beacon_map.as_ref()
    }

    /// Latest raw distances for a hedgehog.
    pub fn distances(&self, hedgehog_address: u8) -> Option<&RawDistanceSet> {
        self.distances.get(&hedgehog_address)
    }

    /// Latest quality reading for a hedgehog.
    pub fn quality(&self, hedgehog_address: u8) -> Option<&QualityReading> {
        self.quality.get(&hedgehog_address)
    }

    /// Latest battery and RSSI reading for a device.
    pub fn telemetry(&self, device_address: u8) -> Option<&TelemetryReading> {
        self.telemetry.get(&device_address)
    }

    /// Addresses of all hedgehogs with a position fix, sorted.
    pub fn hedgehog_addresses(&self) -> Vec<u8> {
        let mut addresses: Vec<u8> = self.positions.keys().copied().collect();
        addresses.sort_unstable();
        addresses
    }

    /// True until the first event is applied.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
            && self.beacon_map.is_none()
            && self.distances.is_empty()
            && self.quality.is_empty()
            && self.telemetry.is_empty()
    }

    /// Drops every stored value, returning the store to its initial state.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.beacon_map = None;
        self.distances.clear();
        self.quality.clear();
        self.telemetry.clear();
    }
}
