//! Driver spawns and manages the stream decoding task.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::pipeline::{DecodePipeline, DecodeStats};
use crate::source::ChunkSource;
use crate::store::DeviceStateStore;
use crate::types::TelemetryEvent;

/// Health of the link between the decoder and its chunk source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum LinkStatus {
    /// Chunks are flowing.
    Connected,
    /// The source reported an error; the driver is backing off and retrying.
    Interrupted,
    /// The stream ended, the error budget ran out, or the driver was shut
    /// down. Terminal.
    Closed,
}

/// What to discard when the stream breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetPolicy {
    /// Discard only the partial frame carried across the break. Last known
    /// device state stays visible, which suits dashboards.
    #[default]
    CarryOnly,
    /// Discard the carried bytes and the device state store, so nothing
    /// decoded before the break survives it.
    CarryAndStore,
}

/// Control messages accepted by the decoding task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCommand {
    /// Toggle decoding. Paused streams stay frame-aligned but drop every
    /// completed frame before it is decoded.
    SetPaused(bool),
    /// Discard carried stream state per the configured [`ResetPolicy`].
    Reset,
}

/// Tuning for the decoding task.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Carry-over bound handed to the frame splitter.
    pub max_carry: usize,
    /// Consecutive source errors tolerated before the driver gives up.
    pub max_source_errors: u32,
    /// Capacity of the event broadcast channel. Slow subscribers lose the
    /// oldest events once they fall this far behind.
    pub event_capacity: usize,
    /// What a stream break discards.
    pub reset_policy: ResetPolicy,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_carry: crate::framing::DEFAULT_MAX_CARRY,
            max_source_errors: 10,
            event_capacity: 256,
            reset_policy: ResetPolicy::default(),
        }
    }
}

/// Result of spawning the driver task.
pub struct DriverChannels {
    /// Receiver for decoded events; call `resubscribe` for additional
    /// independent subscriptions. The decoding task holds the only sender,
    /// so event streams end once the task does.
    pub events: broadcast::Receiver<TelemetryEvent>,
    /// Receiver for device state snapshots, replaced after every chunk that
    /// decoded at least one packet.
    pub state: watch::Receiver<Arc<DeviceStateStore>>,
    /// Receiver for link status updates.
    pub status: watch::Receiver<LinkStatus>,
    /// Receiver for decode counters.
    pub stats: watch::Receiver<DecodeStats>,
    /// Sender for control commands.
    pub commands: mpsc::UnboundedSender<DriverCommand>,
    /// Cancellation token for graceful shutdown.
    pub cancel: CancellationToken,
}

/// Driver spawns and manages the stream decoding task.
///
/// The spawned task owns the chunk source, the decode pipeline and the
/// device state store. Everything it learns is published through channels,
/// so any number of consumers can watch one modem.
pub struct Driver;

impl Driver {
    /// Spawns the decoding task with default tuning.
    pub fn spawn<S>(source: S) -> DriverChannels
    where
        S: ChunkSource,
    {
        Self::spawn_with(source, DriverConfig::default())
    }

    /// Spawns the decoding task with explicit tuning.
    pub fn spawn_with<S>(source: S, config: DriverConfig) -> DriverChannels
    where
        S: ChunkSource,
    {
        let (event_tx, event_rx) = broadcast::channel(config.event_capacity.max(1));
        let (state_tx, state_rx) = watch::channel(Arc::new(DeviceStateStore::new()));
        let (status_tx, status_rx) = watch::channel(LinkStatus::Connected);
        let (stats_tx, stats_rx) = watch::channel(DecodeStats::default());
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let cancel = CancellationToken::new();
        let cancel_task = cancel.clone();

        tokio::spawn(async move {
            Self::chunk_reader_task(
                source,
                config,
                event_tx,
                state_tx,
                status_tx,
                stats_tx,
                command_rx,
                cancel_task,
            )
            .await;
        });

        DriverChannels {
            events: event_rx,
            state: state_rx,
            status: status_rx,
            stats: stats_rx,
            commands: command_tx,
            cancel,
        }
    }

    /// Chunk reader task: reads chunks, decodes them, publishes results.
    #[allow(clippy::too_many_arguments)]
    async fn chunk_reader_task<S>(
        mut source: S,
        config: DriverConfig,
        event_tx: broadcast::Sender<TelemetryEvent>,
        state_tx: watch::Sender<Arc<DeviceStateStore>>,
        status_tx: watch::Sender<LinkStatus>,
        stats_tx: watch::Sender<DecodeStats>,
        mut command_rx: mpsc::UnboundedReceiver<DriverCommand>,
        cancel: CancellationToken,
    ) where
        S: ChunkSource,
    {
        info!("chunk reader task started");
        let mut pipeline = DecodePipeline::with_max_carry(config.max_carry);
        let mut store = DeviceStateStore::new();
        let mut chunk_count = 0u64;
        let mut error_streak = 0u32;
        let mut commands_open = true;

        loop {
            if cancel.is_cancelled() {
                info!("chunk reader cancelled");
                break;
            }

            // Race the read against shutdown and control commands, biased so
            // a command already queued applies before the read it races.
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("chunk reader cancelled during read");
                    break;
                }
                command = command_rx.recv(), if commands_open => {
                    match command {
                        Some(command) => Self::apply_command(
                            command,
                            &config,
                            &mut pipeline,
                            &mut store,
                            &state_tx,
                        ),
                        None => commands_open = false,
                    }
                    continue;
                }
                result = source.next_chunk() => result,
            };

            match result {
                Ok(Some(chunk)) => {
                    chunk_count += 1;
                    error_streak = 0;

                    if *status_tx.borrow() == LinkStatus::Interrupted {
                        info!(chunk_count, "chunk source recovered");
                        let _ = status_tx.send(LinkStatus::Connected);
                    }

                    let events = pipeline.feed(&chunk, &mut store);
                    trace!(bytes = chunk.len(), events = events.len(), "chunk decoded");

                    if !events.is_empty() {
                        let _ = state_tx.send(Arc::new(store.clone()));
                        for event in events {
                            // Err only means no subscriber is listening right now.
                            let _ = event_tx.send(event);
                        }
                    }
                    let _ = stats_tx.send(pipeline.stats());
                }
                Ok(None) => {
                    info!(chunk_count, "chunk source ended");
                    break;
                }
                Err(e) => {
                    error_streak += 1;
                    warn!(
                        error = %e,
                        streak = error_streak,
                        max = config.max_source_errors,
                        "chunk source error"
                    );

                    Self::apply_reset(&config, &mut pipeline, &mut store, &state_tx);
                    let _ = status_tx.send(LinkStatus::Interrupted);
                    let _ = stats_tx.send(pipeline.stats());

                    if error_streak >= config.max_source_errors {
                        error!("too many chunk source errors, shutting down");
                        break;
                    }

                    // Exponential backoff: 50ms, 100ms, 200ms, ...
                    let backoff =
                        std::time::Duration::from_millis(50 * (1 << error_streak.min(5)));
                    tokio::select! {
                        _ = cancel.cancelled() => {
                            info!("chunk reader cancelled during backoff");
                            break;
                        }
                        _ = tokio::time::sleep(backoff) => {}
                    }
                }
            }
        }

        let _ = status_tx.send(LinkStatus::Closed);
        let _ = stats_tx.send(pipeline.stats());
        info!(chunk_count, "chunk reader task ended");
    }

    fn apply_command(
        command: DriverCommand,
        config: &DriverConfig,
        pipeline: &mut DecodePipeline,
        store: &mut DeviceStateStore,
        state_tx: &watch::Sender<Arc<DeviceStateStore>>,
    ) {
        match command {
            DriverCommand::SetPaused(paused) => {
                debug!(paused, "decode pause toggled");
                pipeline.set_paused(paused);
            }
            DriverCommand::Reset => {
                debug!("stream reset requested");
                Self::apply_reset(config, pipeline, store, state_tx);
            }
        }
    }

    fn apply_reset(
        config: &DriverConfig,
        pipeline: &mut DecodePipeline,
        store: &mut DeviceStateStore,
        state_tx: &watch::Sender<Arc<DeviceStateStore>>,
    ) {
        pipeline.reset();
        if config.reset_policy == ResetPolicy::CarryAndStore {
            *store = DeviceStateStore::new();
            let _ = state_tx.send(Arc::new(store.clone()));
        }
    }
}
