//! Line protocol spoken by the monitor front ends.
//!
//! Each input is one JSON object tagged by `type`; each produces exactly one
//! [`MonitorOutput`].

use boundary_types::{ActiveGrant, AppId, Decision, EventKind, ForegroundEvent};
use serde::{Deserialize, Serialize};

/// One request to the monitor.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MonitorInput {
    /// A foreground change reported by the platform.
    Window {
        #[serde(default)]
        package: Option<String>,
        #[serde(default = "window_changed")]
        kind: EventKind,
    },
    /// The friction task finished.
    TaskCompleted { success: bool },
    /// The overlay could not be shown or was closed without a task.
    OverlayDismissed,
    /// Drop any grant for `package`.
    Revoke { package: String },
    /// List unexpired grants.
    Grants,
    /// Replace the bounded-app set.
    SetBounded { packages: Vec<String> },
}

fn window_changed() -> EventKind {
    EventKind::WindowChanged
}

impl MonitorInput {
    /// The foreground event carried by a `window` input.
    pub fn as_event(&self) -> Option<ForegroundEvent> {
        match self {
            Self::Window { package, kind } => Some(window_event(package.as_deref(), *kind)),
            _ => None,
        }
    }
}

pub(crate) fn window_event(package: Option<&str>, kind: EventKind) -> ForegroundEvent {
    ForegroundEvent::new(package.map(AppId::from), kind)
}

/// One reply from the monitor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MonitorOutput {
    Decision {
        #[serde(skip_serializing_if = "Option::is_none")]
        package: Option<String>,
        #[serde(flatten)]
        decision: Decision,
    },
    TaskCompleted {
        grant: Option<ActiveGrant>,
    },
    OverlayDismissed,
    Revoked {
        package: String,
        removed: bool,
    },
    Grants {
        grants: Vec<ActiveGrant>,
    },
    Bounded {
        count: usize,
    },
    /// The request was understood but could not be carried out.
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use boundary_types::SuppressReason;

    #[test]
    fn test_window_input_defaults_kind() {
        let input: MonitorInput =
            serde_json::from_str(r#"{"type":"window","package":"social.app"}"#).unwrap();
        assert_eq!(
            input.as_event(),
            Some(ForegroundEvent::window_changed("social.app"))
        );
    }

    #[test]
    fn test_window_input_without_package() {
        let input: MonitorInput =
            serde_json::from_str(r#"{"type":"window","kind":"notification_posted"}"#).unwrap();
        assert_eq!(
            input.as_event(),
            Some(ForegroundEvent::new(None, EventKind::NotificationPosted))
        );
    }

    #[test]
    fn test_other_inputs_parse() {
        let input: MonitorInput =
            serde_json::from_str(r#"{"type":"task_completed","success":true}"#).unwrap();
        assert_eq!(input, MonitorInput::TaskCompleted { success: true });
        assert_eq!(input.as_event(), None);

        let input: MonitorInput =
            serde_json::from_str(r#"{"type":"set_bounded","packages":["a","b"]}"#).unwrap();
        assert_eq!(
            input,
            MonitorInput::SetBounded {
                packages: vec!["a".to_string(), "b".to_string()]
            }
        );
    }

    #[test]
    fn test_decision_output_is_flat() {
        let output = MonitorOutput::Decision {
            package: Some("social.app".to_string()),
            decision: Decision::suppress(SuppressReason::Cooldown),
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["type"], "decision");
        assert_eq!(json["decision"], "suppress");
        assert_eq!(json["reason"], "cooldown");
        assert_eq!(json["package"], "social.app");
    }
}
