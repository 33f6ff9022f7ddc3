use std::sync::Arc;

use boundary_engine::{ConfigReadError, GrantDurationSource};

use crate::store::Preferences;

/// Reads the grant-duration override from preferences on every grant.
///
/// The engine validates the value; this adapter only maps storage errors.
#[derive(Clone)]
pub struct PrefsDurationSource {
    prefs: Arc<dyn Preferences>,
}

impl PrefsDurationSource {
    pub fn new(prefs: Arc<dyn Preferences>) -> Self {
        Self { prefs }
    }
}

impl GrantDurationSource for PrefsDurationSource {
    fn grant_minutes(&self) -> Result<Option<i64>, ConfigReadError> {
        self.prefs
            .access_duration_minutes()
            .map_err(|e| ConfigReadError::Unavailable(e.to_string()))
    }
}
