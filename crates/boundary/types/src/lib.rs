//! Boundary Types - shared vocabulary of the bounded-app access control engine.
//!
//! An application the user has *bounded* is not blocked. When it comes to the
//! foreground the engine either stays quiet (ignore), deliberately holds back
//! (suppress), or asks the presentation layer for an awareness moment
//! (intervene). These types travel between the event source, the engine, and
//! the presentation layer.

#![deny(unsafe_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque application identifier (package or bundle id).
///
/// Equality is exact and case-sensitive. No normalisation is applied.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AppId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AppId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Kind of window event delivered by the platform event source.
///
/// Only [`EventKind::WindowChanged`] is acted upon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new window came to the foreground.
    WindowChanged,
    /// Content inside the current window changed.
    WindowContentChanged,
    /// A notification was posted.
    NotificationPosted,
    /// Anything else the platform reports.
    Other,
}

/// A single foreground-change notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForegroundEvent {
    /// Identifier of the application owning the window, if the platform knew it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<AppId>,
    pub kind: EventKind,
}

impl ForegroundEvent {
    pub fn new(app_id: Option<AppId>, kind: EventKind) -> Self {
        Self { app_id, kind }
    }

    /// Shorthand for the only event kind the engine cares about.
    pub fn window_changed(app_id: impl Into<AppId>) -> Self {
        Self {
            app_id: Some(app_id.into()),
            kind: EventKind::WindowChanged,
        }
    }
}

/// Why an event for a bounded app was held back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressReason {
    /// The user earned temporary access that has not expired yet.
    ActiveGrant,
    /// The host itself or a critical system app; never intercepted.
    SafetyOverride,
    /// The same app was intervened on moments ago.
    Cooldown,
    /// An intervention was due but the overlay could not be requested.
    DispatchFailed,
}

impl std::fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SuppressReason::ActiveGrant => "active_grant",
            SuppressReason::SafetyOverride => "safety_override",
            SuppressReason::Cooldown => "cooldown",
            SuppressReason::DispatchFailed => "dispatch_failed",
        };
        f.write_str(s)
    }
}

/// Payload handed to the presentation layer when an intervention is due.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterventionNotice {
    pub notice_id: Uuid,
    pub app_id: AppId,
    pub timestamp: DateTime<Utc>,
}

impl InterventionNotice {
    pub fn new(app_id: AppId, timestamp: DateTime<Utc>) -> Self {
        Self {
            notice_id: Uuid::new_v4(),
            app_id,
            timestamp,
        }
    }
}

/// Outcome of evaluating one foreground event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// Not a boundary event at all.
    Ignore,
    /// A bounded app, deliberately not intercepted this time.
    Suppress { reason: SuppressReason },
    /// An awareness moment was requested.
    Intervene { notice: InterventionNotice },
}

impl Decision {
    pub fn suppress(reason: SuppressReason) -> Self {
        Decision::Suppress { reason }
    }

    pub fn is_ignore(&self) -> bool {
        matches!(self, Decision::Ignore)
    }

    pub fn is_intervene(&self) -> bool {
        matches!(self, Decision::Intervene { .. })
    }

    /// The suppression reason, if this is a suppression.
    pub fn suppress_reason(&self) -> Option<SuppressReason> {
        match self {
            Decision::Suppress { reason } => Some(*reason),
            _ => None,
        }
    }
}

/// One unexpired entry of the grant ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveGrant {
    pub app_id: AppId,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_id_equality_is_case_sensitive() {
        assert_ne!(AppId::new("Social.App"), AppId::new("social.app"));
        assert_eq!(AppId::from("social.app"), AppId::new("social.app"));
    }

    #[test]
    fn event_json_uses_snake_case_kind() {
        let event = ForegroundEvent::window_changed("social.app");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "window_changed");
        assert_eq!(json["app_id"], "social.app");
    }

    #[test]
    fn event_without_app_id_deserializes() {
        let event: ForegroundEvent =
            serde_json::from_str(r#"{"kind":"window_changed"}"#).unwrap();
        assert!(event.app_id.is_none());
    }

    #[test]
    fn decision_accessors() {
        let d = Decision::suppress(SuppressReason::Cooldown);
        assert_eq!(d.suppress_reason(), Some(SuppressReason::Cooldown));
        assert!(!d.is_intervene());
        assert!(Decision::Ignore.is_ignore());
    }

    #[test]
    fn decision_serializes_with_tag() {
        let d = Decision::suppress(SuppressReason::ActiveGrant);
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["decision"], "suppress");
        assert_eq!(json["reason"], "active_grant");
    }
}
