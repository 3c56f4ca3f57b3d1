//! Messages into the frame loop and sinks for what comes out of it.

use std::io::Write;
use std::sync::{Arc, Mutex};

use impact_core::commands::GlobeCommand;
use impact_core::state::GlobeSnapshot;
use impact_geo::LocationRegistry;

use crate::error::AppError;

/// Messages sent to the frame loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Host input to forward to the engine.
    Globe(GlobeCommand),
    /// Result of the one-time background registry load.
    RegistryLoaded(Result<LocationRegistry, AppError>),
    /// Stop the loop after the current tick.
    Shutdown,
}

/// Receives every snapshot the loop produces, in tick order.
pub trait SnapshotSink: Send + 'static {
    fn publish(&mut self, snapshot: &GlobeSnapshot);
}

/// Collects snapshots in memory.
impl SnapshotSink for Vec<GlobeSnapshot> {
    fn publish(&mut self, snapshot: &GlobeSnapshot) {
        self.push(snapshot.clone());
    }
}

/// Keeps only the newest snapshot for synchronous polling from other threads.
#[derive(Debug, Clone, Default)]
pub struct LatestSnapshot(Arc<Mutex<Option<GlobeSnapshot>>>);

impl LatestSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the newest snapshot, if any tick has run.
    pub fn get(&self) -> Option<GlobeSnapshot> {
        self.0.lock().ok().and_then(|lock| lock.clone())
    }
}

impl SnapshotSink for LatestSnapshot {
    fn publish(&mut self, snapshot: &GlobeSnapshot) {
        if let Ok(mut lock) = self.0.lock() {
            *lock = Some(snapshot.clone());
        }
    }
}

/// Writes one JSON document per line.
pub struct JsonLinesSink<W> {
    writer: W,
    failed: bool,
}

impl<W: Write + Send + 'static> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            failed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send + 'static> SnapshotSink for JsonLinesSink<W> {
    fn publish(&mut self, snapshot: &GlobeSnapshot) {
        if self.failed {
            return;
        }
        let result = serde_json::to_writer(&mut self.writer, snapshot)
            .map_err(std::io::Error::from)
            .and_then(|()| self.writer.write_all(b"\n"))
            .and_then(|()| self.writer.flush());
        if let Err(err) = result {
            // Usually a closed pipe; stop writing but keep the loop alive.
            tracing::warn!(%err, "snapshot output failed, disabling");
            self.failed = true;
        }
    }
}
