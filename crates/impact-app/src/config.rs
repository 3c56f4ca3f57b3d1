//! Host configuration, read from a TOML file. Every field has a default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use impact_core::commands::GlobeCommand;
use impact_core::constants::TICK_RATE;
use impact_sim::EngineConfig;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV or JSON location table. Labels read "Unknown" without one.
    pub locations_path: Option<PathBuf>,
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    pub log_filter: String,
    /// Stop after this many ticks. 0 runs until shutdown.
    pub max_ticks: u64,
    /// Wall-clock ticks per second when `realtime` is set.
    pub tick_rate: u32,
    /// Pace ticks against the wall clock instead of running flat out.
    pub realtime: bool,
    pub engine: EngineConfig,
    pub scenario: ScenarioConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locations_path: None,
            log_filter: "info".to_string(),
            max_ticks: 10 * TICK_RATE as u64,
            tick_rate: TICK_RATE,
            realtime: true,
            engine: EngineConfig::default(),
            scenario: ScenarioConfig::default(),
        }
    }
}

/// Host input replayed at fixed ticks, for headless runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub inputs: Vec<ScriptedInput>,
}

/// `command` is queued just before tick `tick` runs (the first tick is 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedInput {
    pub tick: u64,
    pub command: GlobeCommand,
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        Ok(config)
    }

    /// `max_ticks` as a limit, if any.
    pub fn tick_limit(&self) -> Option<u64> {
        (self.max_ticks > 0).then_some(self.max_ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impact_core::enums::{LongitudeConvention, PointerButton};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_full_config() {
        let text = r#"
            locations_path = "data/countries.csv"
            log_filter = "impact_sim=debug"
            max_ticks = 0
            realtime = false

            [engine]
            initial_base_scale = 25.0
            longitude_convention = "NegatedAtan2ZX"

            [engine.camera]
            position = [0.0, 0.0, 4000.0]
            fov_y_deg = 45.0

            [engine.viewport]
            width = 800.0
            height = 600.0

            [[scenario.inputs]]
            tick = 0
            command = { type = "PointerDown", button = "Primary", x = 400.0, y = 300.0, timestamp_ms = 0 }

            [[scenario.inputs]]
            tick = 0
            command = { type = "PointerUp", button = "Primary", x = 400.0, y = 300.0, timestamp_ms = 40 }

            [[scenario.inputs]]
            tick = 2
            command = { type = "LaunchAsteroid" }
        "#;
        let config = AppConfig::from_toml_str(text).unwrap();
        assert_eq!(config.locations_path, Some(PathBuf::from("data/countries.csv")));
        assert_eq!(config.tick_limit(), None);
        assert!(!config.realtime);
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.engine.initial_base_scale, 25.0);
        assert_eq!(
            config.engine.longitude_convention,
            LongitudeConvention::NegatedAtan2ZX
        );
        assert_eq!(config.engine.camera.position.z, 4000.0);
        assert_eq!(config.engine.camera.fov_y_deg, 45.0);
        // Unset camera fields keep their defaults.
        assert_eq!(config.engine.camera.near, 0.1);
        assert_eq!(config.engine.viewport.width, 800.0);
        assert_eq!(config.scenario.inputs.len(), 3);
        assert_eq!(
            config.scenario.inputs[1].command,
            GlobeCommand::PointerUp {
                button: PointerButton::Primary,
                x: 400.0,
                y: 300.0,
                timestamp_ms: 40,
            }
        );
        assert_eq!(config.scenario.inputs[2].command, GlobeCommand::LaunchAsteroid);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = AppConfig::from_toml_str("max_ticks = \"lots\"").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/impact.toml")).unwrap_err();
        assert!(matches!(err, AppError::ConfigFile { .. }));
    }
}
