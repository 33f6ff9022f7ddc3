//! CLI error types

use boundary_monitor::MonitorError;
use boundary_prefs::PrefsError;
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Preference storage error
    #[error("Preferences error: {0}")]
    Prefs(#[from] PrefsError),

    /// Monitor error
    #[error(transparent)]
    Monitor(#[from] MonitorError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
