//! Grant ledger: time-boxed earned access.
//!
//! An entry whose expiry is at or before "now" is logically absent. Expired
//! entries are not swept; they are removed the next time [`GrantLedger::check`]
//! looks at them. [`GrantLedger::active`] is a read-only view and never removes
//! anything, so lazy deletion is only observable through `check`.

use std::collections::HashMap;

use boundary_types::{ActiveGrant, AppId};
use chrono::{DateTime, Utc};

/// Result of consulting the ledger for one app.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrantStatus {
    /// Access is granted until the given instant.
    Live(DateTime<Utc>),
    /// A grant existed but had run out; it has now been removed.
    Expired(DateTime<Utc>),
    /// No grant on record.
    Absent,
}

#[derive(Clone, Debug, Default)]
pub struct GrantLedger {
    grants: HashMap<AppId, DateTime<Utc>>,
}

impl GrantLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Returns the expiry that was replaced, if any.
    pub fn grant(&mut self, app: AppId, expires_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.grants.insert(app, expires_at)
    }

    /// Remove a grant. Returns whether one was present.
    pub fn revoke(&mut self, app: &AppId) -> bool {
        self.grants.remove(app).is_some()
    }

    /// Look up a grant, removing it if it has expired.
    pub fn check(&mut self, app: &AppId, now: DateTime<Utc>) -> GrantStatus {
        match self.grants.get(app).copied() {
            Some(expires_at) if expires_at > now => GrantStatus::Live(expires_at),
            Some(expires_at) => {
                self.grants.remove(app);
                GrantStatus::Expired(expires_at)
            }
            None => GrantStatus::Absent,
        }
    }

    /// Unexpired grants at `now`, sorted by app id.
    pub fn active(&self, now: DateTime<Utc>) -> Vec<ActiveGrant> {
        let mut active: Vec<ActiveGrant> = self
            .grants
            .iter()
            .filter(|(_, expires_at)| **expires_at > now)
            .map(|(app_id, expires_at)| ActiveGrant {
                app_id: app_id.clone(),
                expires_at: *expires_at,
            })
            .collect();
        active.sort_by(|a, b| a.app_id.cmp(&b.app_id));
        active
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    #[test]
    fn live_until_expiry_exclusive() {
        let mut ledger = GrantLedger::new();
        let app = AppId::new("social.app");
        let expiry = t0() + Duration::minutes(5);
        ledger.grant(app.clone(), expiry);

        assert_eq!(ledger.check(&app, t0()), GrantStatus::Live(expiry));
        assert_eq!(
            ledger.check(&app, expiry - Duration::milliseconds(1)),
            GrantStatus::Live(expiry)
        );
        assert_eq!(ledger.check(&app, expiry), GrantStatus::Expired(expiry));
        assert_eq!(ledger.check(&app, expiry), GrantStatus::Absent);
    }

    #[test]
    fn active_view_does_not_remove_expired_entries() {
        let mut ledger = GrantLedger::new();
        ledger.grant(AppId::new("a"), t0() + Duration::seconds(10));
        ledger.grant(AppId::new("b"), t0() + Duration::seconds(60));

        let later = t0() + Duration::seconds(30);
        let active = ledger.active(later);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].app_id, AppId::new("b"));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn regrant_overwrites() {
        let mut ledger = GrantLedger::new();
        let app = AppId::new("a");
        ledger.grant(app.clone(), t0() + Duration::minutes(10));
        let previous = ledger.grant(app.clone(), t0() + Duration::minutes(2));
        assert_eq!(previous, Some(t0() + Duration::minutes(10)));
        assert_eq!(
            ledger.check(&app, t0()),
            GrantStatus::Live(t0() + Duration::minutes(2))
        );
    }

    #[test]
    fn revoke_reports_presence() {
        let mut ledger = GrantLedger::new();
        assert!(!ledger.revoke(&AppId::new("missing")));
        ledger.grant(AppId::new("a"), t0());
        assert!(ledger.revoke(&AppId::new("a")));
        assert!(ledger.is_empty());
    }
}
