//! Top-level errors for the headless host.

use std::path::PathBuf;

use thiserror::Error;

use impact_geo::RegistryError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config {}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("location data unavailable: {0}")]
    Registry(#[from] RegistryError),
    #[error("game loop thread panicked")]
    LoopPanicked,
}
