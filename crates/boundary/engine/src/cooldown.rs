use boundary_types::AppId;
use chrono::{DateTime, Duration, Utc};

/// Remembers the most recent intervention only.
///
/// A single app switch can produce a burst of window events; anything for the
/// same app inside the window is a duplicate of the one already handled.
#[derive(Clone, Debug)]
pub struct CooldownTracker {
    window: Duration,
    last: Option<(AppId, DateTime<Utc>)>,
}

impl CooldownTracker {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Whether `app` was triggered less than one window before `now`.
    pub fn is_cooling(&self, app: &AppId, now: DateTime<Utc>) -> bool {
        match &self.last {
            Some((last_app, triggered_at)) => {
                last_app == app && now.signed_duration_since(*triggered_at) < self.window
            }
            None => false,
        }
    }

    /// Record a trigger, replacing whatever was remembered before.
    pub fn record(&mut self, app: AppId, now: DateTime<Utc>) {
        self.last = Some((app, now));
    }

    /// Forget the entry if it is still exactly `(app, at)`.
    pub fn rollback(&mut self, app: &AppId, at: DateTime<Utc>) -> bool {
        let matches = matches!(&self.last, Some((last_app, t)) if last_app == app && *t == at);
        if matches {
            self.last = None;
        }
        matches
    }

    pub fn last(&self) -> Option<(&AppId, DateTime<Utc>)> {
        self.last.as_ref().map(|(app, at)| (app, *at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    #[test]
    fn cooling_only_within_window_for_same_app() {
        let mut tracker = CooldownTracker::new(Duration::seconds(3));
        let app = AppId::new("social.app");
        tracker.record(app.clone(), t0());

        assert!(tracker.is_cooling(&app, t0() + Duration::seconds(1)));
        assert!(!tracker.is_cooling(&app, t0() + Duration::seconds(3)));
        assert!(!tracker.is_cooling(&AppId::new("other.app"), t0()));
    }

    #[test]
    fn new_trigger_replaces_previous() {
        let mut tracker = CooldownTracker::new(Duration::seconds(3));
        tracker.record(AppId::new("a"), t0());
        tracker.record(AppId::new("b"), t0() + Duration::seconds(1));

        assert!(!tracker.is_cooling(&AppId::new("a"), t0() + Duration::seconds(1)));
        assert_eq!(tracker.last().map(|(app, _)| app.clone()), Some(AppId::new("b")));
    }

    #[test]
    fn rollback_requires_exact_entry() {
        let mut tracker = CooldownTracker::new(Duration::seconds(3));
        let app = AppId::new("a");
        tracker.record(app.clone(), t0());

        assert!(!tracker.rollback(&app, t0() + Duration::seconds(1)));
        assert!(tracker.last().is_some());
        assert!(tracker.rollback(&app, t0()));
        assert!(tracker.last().is_none());
    }
}
