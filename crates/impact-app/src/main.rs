use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use tracing_subscriber::EnvFilter;

use impact_app::config::AppConfig;
use impact_app::error::AppError;
use impact_app::game_loop::{self, LoopSettings};
use impact_app::state::{GameLoopCommand, JsonLinesSink};
use impact_core::commands::GlobeCommand;

/// Usage: `impact-globe [config.toml]`
///
/// Snapshots go to stdout as JSON lines, logs to stderr. Host commands may be
/// piped in on stdin, one JSON object per line.
fn main() -> ExitCode {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => AppConfig::load(&path),
        None => Ok(AppConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            eprintln!("impact-globe: {err}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.log_filter);

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "impact-globe failed");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(config: AppConfig) -> Result<(), AppError> {
    let sink = JsonLinesSink::new(std::io::stdout());
    let (cmd_tx, handle) = game_loop::spawn_game_loop(
        config.engine.clone(),
        LoopSettings::from_config(&config),
        sink,
    )?;

    if let Some(path) = config.locations_path.clone() {
        game_loop::spawn_registry_loader(path, cmd_tx.clone())?;
    } else {
        tracing::warn!("no locations_path configured; labels will read Unknown");
    }
    spawn_stdin_reader(cmd_tx.clone())?;

    let result = handle.join().map_err(|_| AppError::LoopPanicked);
    drop(cmd_tx);
    result.map(drop)
}

/// Forwards JSON-encoded commands from stdin. Malformed lines are skipped.
fn spawn_stdin_reader(cmd_tx: mpsc::Sender<GameLoopCommand>) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("impact-stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<GlobeCommand>(&line) {
                    Ok(cmd) => {
                        if cmd_tx.send(GameLoopCommand::Globe(cmd)).is_err() {
                            break;
                        }
                    }
                    Err(err) => tracing::warn!(%err, "skipping malformed command"),
                }
            }
        })?;
    Ok(())
}
