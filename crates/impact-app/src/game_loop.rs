//! Frame loop thread: runs the globe engine and publishes a snapshot per tick.
//!
//! The engine is created inside the loop thread and never shared. Host input
//! and the registry load result arrive over an `mpsc` channel and are queued
//! at the next tick boundary.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use impact_core::enums::AlertLevel;
use impact_geo::LocationRegistry;
use impact_sim::{EngineConfig, GlobeEngine};

use crate::config::{AppConfig, ScriptedInput};
use crate::error::AppError;
use crate::state::{GameLoopCommand, SnapshotSink};

/// How the loop is paced and when it stops.
#[derive(Debug, Clone, Default)]
pub struct LoopSettings {
    pub tick_rate: u32,
    pub realtime: bool,
    pub max_ticks: Option<u64>,
    pub scenario: Vec<ScriptedInput>,
}

impl LoopSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            tick_rate: config.tick_rate,
            realtime: config.realtime,
            max_ticks: config.tick_limit(),
            scenario: config.scenario.inputs.clone(),
        }
    }

    /// Wall-clock duration of one tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate.max(1)))
    }
}

/// Spawns the frame loop in a new thread.
///
/// Returns the command sender and a handle yielding the sink once the loop
/// ends.
pub fn spawn_game_loop<S: SnapshotSink>(
    engine_config: EngineConfig,
    settings: LoopSettings,
    sink: S,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<S>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("impact-frame-loop".into())
        .spawn(move || run_game_loop(engine_config, settings, cmd_rx, sink))?;

    Ok((cmd_tx, handle))
}

/// Loads location data on a background thread and delivers it to the loop.
pub fn spawn_registry_loader(
    path: PathBuf,
    cmd_tx: mpsc::Sender<GameLoopCommand>,
) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("impact-registry-loader".into())
        .spawn(move || {
            let result = LocationRegistry::load(&path).map_err(AppError::from);
            if cmd_tx.send(GameLoopCommand::RegistryLoaded(result)).is_err() {
                tracing::debug!("frame loop gone before registry load finished");
            }
        })
}

/// The frame loop. Runs until Shutdown, channel disconnect, or the tick limit.
pub fn run_game_loop<S: SnapshotSink>(
    engine_config: EngineConfig,
    settings: LoopSettings,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    mut sink: S,
) -> S {
    let mut engine = GlobeEngine::new(engine_config);
    let mut scenario: Vec<ScriptedInput> = settings.scenario.clone();
    scenario.sort_by_key(|input| input.tick);
    let mut scenario = VecDeque::from(scenario);

    let tick_duration = settings.tick_duration();
    let mut next_tick_time = Instant::now();
    tracing::info!(
        tick_rate = settings.tick_rate,
        realtime = settings.realtime,
        max_ticks = ?settings.max_ticks,
        "frame loop started"
    );

    loop {
        // 1. Drain all pending messages
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Globe(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::RegistryLoaded(Ok(registry))) => {
                    engine.install_registry(registry);
                }
                Ok(GameLoopCommand::RegistryLoaded(Err(err))) => {
                    engine.report_alert(AlertLevel::Critical, err.to_string());
                }
                Ok(GameLoopCommand::Shutdown) => {
                    tracing::info!(tick = engine.time().tick, "frame loop shut down");
                    return sink;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::info!(tick = engine.time().tick, "command channel closed");
                    return sink;
                }
            }
        }

        // 2. Scripted input due before this tick
        let tick = engine.time().tick;
        while scenario.front().is_some_and(|input| input.tick <= tick) {
            if let Some(input) = scenario.pop_front() {
                engine.queue_command(input.command);
            }
        }

        // 3. Advance one tick and publish
        let snapshot = engine.tick();
        sink.publish(&snapshot);

        if settings.max_ticks.is_some_and(|max| snapshot.time.tick >= max) {
            tracing::info!(tick = snapshot.time.tick, "tick limit reached");
            return sink;
        }

        // 4. Sleep until next tick
        if settings.realtime {
            next_tick_time += tick_duration;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > tick_duration * 2 {
                // Too far behind; reset instead of bursting to catch up.
                next_tick_time = now;
            }
        }
    }
}
