//! Connection handle over a running decoder.

use std::sync::Arc;

use futures::Stream;
use tokio::sync::{broadcast, mpsc, watch};
use tokio_stream::wrappers::{BroadcastStream, WatchStream};
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::driver::{Driver, DriverChannels, DriverCommand, DriverConfig, LinkStatus};
use crate::pipeline::DecodeStats;
use crate::source::ChunkSource;
use crate::store::DeviceStateStore;
use crate::types::{
    BeaconMap, HedgehogPosition, QualityReading, RawDistanceSet, TelemetryEvent, TelemetryReading,
};

/// Handle to a decoding task attached to one chunk source.
///
/// Attaching spawns the driver task; the handle is a thin veneer over its
/// channels. Clones of the streams it hands out stay valid independently of
/// the handle, but dropping the handle shuts the decoder down.
pub struct Connection {
    events: broadcast::Receiver<TelemetryEvent>,
    state: watch::Receiver<Arc<DeviceStateStore>>,
    status: watch::Receiver<LinkStatus>,
    stats: watch::Receiver<DecodeStats>,
    commands: mpsc::UnboundedSender<DriverCommand>,
    cancel: CancellationToken,
}

impl Connection {
    /// Attaches a decoder to a chunk source with default tuning.
    pub fn attach<S>(source: S) -> Self
    where
        S: ChunkSource,
    {
        Self::attach_with(source, DriverConfig::default())
    }

    /// Attaches a decoder with explicit tuning.
    pub fn attach_with<S>(source: S, config: DriverConfig) -> Self
    where
        S: ChunkSource,
    {
        let DriverChannels { events, state, status, stats, commands, cancel } =
            Driver::spawn_with(source, config);
        Self { events, state, status, stats, commands, cancel }
    }

    /// Subscribe to decoded events, one per packet, in wire order.
    ///
    /// Each call gets an independent subscription starting at the present.
    /// A subscriber that falls behind the event channel capacity loses the
    /// oldest events and continues from where the channel still reaches.
    /// The stream ends once the decoder shuts down and the backlog drains.
    pub fn events(&self) -> impl Stream<Item = TelemetryEvent> + 'static {
        BroadcastStream::new(self.events.resubscribe()).filter_map(|result| result.ok())
    }

    /// Subscribe to device state snapshots.
    ///
    /// Yields the current snapshot immediately, then a fresh one after every
    /// chunk that decoded at least one packet.
    pub fn state_updates(&self) -> impl Stream<Item = Arc<DeviceStateStore>> + 'static {
        WatchStream::new(self.state.clone())
    }

    /// The current device state snapshot.
    pub fn snapshot(&self) -> Arc<DeviceStateStore> {
        self.state.borrow().clone()
    }

    /// Latest position fix for a hedgehog.
    pub fn latest_position(&self, address: u8) -> Option<HedgehogPosition> {
        self.state.borrow().position(address).copied()
    }

    /// Latest raw distances for a hedgehog.
    pub fn latest_distances(&self, hedgehog_address: u8) -> Option<RawDistanceSet> {
        self.state.borrow().distances(hedgehog_address).copied()
    }

    /// Latest quality reading for a hedgehog.
    pub fn latest_quality(&self, hedgehog_address: u8) -> Option<QualityReading> {
        self.state.borrow().quality(hedgehog_address).copied()
    }

    /// Latest battery and RSSI reading for a device.
    pub fn latest_telemetry(&self, device_address: u8) -> Option<TelemetryReading> {
        self.state.borrow().telemetry(device_address).copied()
    }

    /// The stationary beacon map, once one has been announced.
    pub fn beacon_map(&self) -> Option<BeaconMap> {
        self.state.borrow().beacon_map().cloned()
    }

    /// Current link status.
    pub fn status(&self) -> LinkStatus {
        *self.status.borrow()
    }

    /// Subscribe to link status changes, current status first.
    pub fn status_updates(&self) -> impl Stream<Item = LinkStatus> + 'static {
        WatchStream::new(self.status.clone())
    }

    /// Decode counters up to now.
    pub fn stats(&self) -> DecodeStats {
        *self.stats.borrow()
    }

    /// Pauses or resumes decoding. Paused streams stay frame-aligned but no
    /// packet is decoded and no state is written.
    pub fn set_paused(&self, paused: bool) {
        let _ = self.commands.send(DriverCommand::SetPaused(paused));
    }

    /// Discards carried stream state per the configured reset policy.
    pub fn reset(&self) {
        let _ = self.commands.send(DriverCommand::Reset);
    }

    /// Waits until the link reaches [`LinkStatus::Closed`].
    pub async fn until_closed(&self) {
        let mut status = self.status.clone();
        // Closed is terminal, so a lost sender also means we are done.
        let _ = status.wait_for(|s| *s == LinkStatus::Closed).await;
    }

    /// Shuts the decoder down. Equivalent to dropping the handle, but
    /// explicit about it.
    pub fn close(&self) {
        self.cancel.cancel();
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        debug!("dropping connection");
        // Cancel the driver task on drop for clean shutdown
        self.cancel.cancel();
    }
}
