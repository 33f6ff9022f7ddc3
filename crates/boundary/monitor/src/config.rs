//! Configuration for the boundary monitor

use std::path::PathBuf;

use boundary_engine::EngineConfig;
use serde::{Deserialize, Serialize};

use crate::error::MonitorResult;

/// Main monitor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Decision engine tuning
    #[serde(default)]
    pub engine: EngineConfig,

    /// Preference storage
    #[serde(default)]
    pub prefs: PrefsConfig,

    /// Presentation queue
    #[serde(default)]
    pub presenter: PresenterConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Preference storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefsConfig {
    /// Path of the JSON preferences file
    #[serde(default = "default_prefs_path")]
    pub path: PathBuf,
}

impl Default for PrefsConfig {
    fn default() -> Self {
        Self {
            path: default_prefs_path(),
        }
    }
}

/// Presentation queue configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenterConfig {
    /// Bound of the presenter message queue
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_prefs_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("boundary")
        .join("prefs.json")
}

fn default_channel_capacity() -> usize {
    16
}

fn default_log_level() -> String {
    "info".to_string()
}

impl MonitorConfig {
    /// Load configuration: defaults, then the optional file, then
    /// `BOUNDARY_<SECTION>__<KEY>` environment variables.
    pub fn load(path: Option<&str>) -> MonitorResult<Self> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&MonitorConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("BOUNDARY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MonitorError;

    #[test]
    fn test_default_config() {
        let config = MonitorConfig::default();
        assert_eq!(config.engine.cooldown_window_ms, 3_000);
        assert_eq!(config.engine.default_grant_minutes, 5);
        assert_eq!(config.engine.host_app_id, "com.idleman.app");
        assert_eq!(config.presenter.channel_capacity, 16);
        assert!(config.prefs.path.ends_with("boundary/prefs.json"));
        assert!(!config.logging.json);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("monitor.toml");
        std::fs::write(
            &path,
            "[engine]\ncooldown_window_ms = 1500\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = MonitorConfig::load(path.to_str()).unwrap();
        assert_eq!(config.engine.cooldown_window_ms, 1_500);
        assert_eq!(config.engine.default_grant_minutes, 5);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("monitor.toml");
        std::fs::write(&path, "[engine]\ncooldown_window_ms = \"soon\"\n").unwrap();

        let result = MonitorConfig::load(path.to_str());
        assert!(matches!(result, Err(MonitorError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = MonitorConfig::load(path.to_str()).unwrap();
        assert_eq!(config.presenter.channel_capacity, 16);
    }
}
