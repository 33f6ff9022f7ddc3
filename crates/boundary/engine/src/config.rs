use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::ConfigReadError;

/// Static engine configuration, fixed for the lifetime of one engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Identifier of the host application (always protected)
    #[serde(default = "default_host_app_id")]
    pub host_app_id: String,

    /// Window during which a repeat event for the same app is a duplicate
    #[serde(default = "default_cooldown_window_ms")]
    pub cooldown_window_ms: u64,

    /// Grant length used when no override is configured
    #[serde(default = "default_grant_minutes")]
    pub default_grant_minutes: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            host_app_id: default_host_app_id(),
            cooldown_window_ms: default_cooldown_window_ms(),
            default_grant_minutes: default_grant_minutes(),
        }
    }
}

impl EngineConfig {
    /// Configuration for a host with the given identifier, other values default.
    pub fn for_host(host_app_id: impl Into<String>) -> Self {
        Self {
            host_app_id: host_app_id.into(),
            ..Default::default()
        }
    }

    pub fn cooldown_window(&self) -> Duration {
        i64::try_from(self.cooldown_window_ms)
            .ok()
            .and_then(Duration::try_milliseconds)
            .unwrap_or(Duration::MAX)
    }

    pub fn default_grant_duration(&self) -> Duration {
        minutes(i64::from(self.default_grant_minutes)).unwrap_or_else(|| Duration::minutes(5))
    }
}

fn default_host_app_id() -> String {
    "com.idleman.app".to_string()
}

fn default_cooldown_window_ms() -> u64 {
    3_000
}

fn default_grant_minutes() -> u32 {
    5
}

/// Positive whole minutes as a duration; `None` for anything unusable.
pub(crate) fn minutes(value: i64) -> Option<Duration> {
    if value <= 0 {
        return None;
    }
    Duration::try_minutes(value)
}

/// Where the per-grant duration override comes from.
///
/// Read once per grant call, outside the engine's critical section.
pub trait GrantDurationSource: Send + Sync {
    /// Configured grant length in minutes, `None` when nothing is configured.
    fn grant_minutes(&self) -> Result<Option<i64>, ConfigReadError>;
}

/// No override; the engine default always applies.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultDuration;

impl GrantDurationSource for DefaultDuration {
    fn grant_minutes(&self) -> Result<Option<i64>, ConfigReadError> {
        Ok(None)
    }
}

/// A fixed override.
#[derive(Clone, Copy, Debug)]
pub struct FixedMinutes(pub i64);

impl GrantDurationSource for FixedMinutes {
    fn grant_minutes(&self) -> Result<Option<i64>, ConfigReadError> {
        Ok(Some(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.cooldown_window(), Duration::seconds(3));
        assert_eq!(config.default_grant_duration(), Duration::minutes(5));
        assert_eq!(config.host_app_id, "com.idleman.app");
    }

    #[test]
    fn zero_default_minutes_falls_back_to_five() {
        let config = EngineConfig {
            default_grant_minutes: 0,
            ..Default::default()
        };
        assert_eq!(config.default_grant_duration(), Duration::minutes(5));
    }

    #[test]
    fn minutes_rejects_non_positive_and_overflow() {
        assert!(minutes(0).is_none());
        assert!(minutes(-3).is_none());
        assert!(minutes(i64::MAX).is_none());
        assert_eq!(minutes(10), Some(Duration::minutes(10)));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"cooldown_window_ms": 500}"#).unwrap();
        assert_eq!(config.cooldown_window(), Duration::milliseconds(500));
        assert_eq!(config.default_grant_minutes, 5);
    }
}
