//! Monitor error types

use boundary_prefs::PrefsError;
use thiserror::Error;

/// Monitor error types
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Preference storage failed
    #[error("Preferences error: {0}")]
    Prefs(#[from] PrefsError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type for monitor operations
pub type MonitorResult<T> = Result<T, MonitorError>;
