use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Everything the host keeps between sessions.
///
/// Unknown fields are ignored and missing ones take their defaults, so older
/// and newer files stay readable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefsDocument {
    /// Durable copy of the boundary set
    #[serde(default)]
    pub bounded_apps: BTreeSet<String>,

    /// Grant length override in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_duration_minutes: Option<i64>,

    /// Last app an intervention was dispatched for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_bounded_package: Option<String>,

    /// Whether an overlay is believed to be on screen
    #[serde(default)]
    pub is_overlay_active: bool,
}
