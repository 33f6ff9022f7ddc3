use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use boundary_types::{
    ActiveGrant, AppId, Decision, EventKind, ForegroundEvent, InterventionNotice, SuppressReason,
};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, trace, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::{minutes, DefaultDuration, EngineConfig, GrantDurationSource};
use crate::cooldown::CooldownTracker;
use crate::dispatch::InterventionDispatcher;
use crate::ledger::{GrantLedger, GrantStatus};
use crate::safety::{is_os_chrome, Protection, SafetyAllowList};
use crate::store::BoundarySet;

/// Mutable state; always accessed under one lock.
struct EngineState {
    boundaries: BoundarySet,
    grants: GrantLedger,
    cooldown: CooldownTracker,
}

/// Outcome of the locked part of a decision.
enum Verdict {
    Ignore,
    Suppress(SuppressReason),
    Intervene(DateTime<Utc>),
}

/// The bounded-app access control engine.
///
/// One instance per process, shared by `Arc` with every collaborator that
/// needs it. `decide` and the grant / revoke / replace calls serialize on a
/// single mutex; none of them perform I/O while holding it. Dispatch to the
/// presentation layer and grant-duration reads happen outside the lock.
pub struct BoundaryEngine {
    state: Mutex<EngineState>,
    safety: SafetyAllowList,
    dispatcher: InterventionDispatcher,
    durations: Arc<dyn GrantDurationSource>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl BoundaryEngine {
    /// Create an engine with an empty boundary set, the wall clock, and no
    /// grant-duration override.
    pub fn new(config: EngineConfig, dispatcher: InterventionDispatcher) -> Self {
        let safety = SafetyAllowList::new(AppId::new(config.host_app_id.clone()));
        let state = EngineState {
            boundaries: BoundarySet::new(),
            grants: GrantLedger::new(),
            cooldown: CooldownTracker::new(config.cooldown_window()),
        };

        info!(
            host = %safety.host(),
            protected = safety.len(),
            cooldown_ms = config.cooldown_window_ms,
            default_grant_minutes = config.default_grant_minutes,
            "Boundary engine created"
        );

        Self {
            state: Mutex::new(state),
            safety,
            dispatcher,
            durations: Arc::new(DefaultDuration),
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the grant-duration source.
    pub fn with_duration_source(mut self, durations: Arc<dyn GrantDurationSource>) -> Self {
        self.durations = durations;
        self
    }

    /// Evaluate one foreground event.
    ///
    /// Rules run in a fixed order and the first match wins:
    ///
    /// 1. no identifier → ignore
    /// 2. OS chrome → ignore
    /// 3. not bounded → ignore
    /// 4. live grant → suppress (an expired grant is dropped and evaluation continues)
    /// 5. host app or safety allow-list → suppress
    /// 6. same app inside the cooldown window → suppress
    /// 7. intervene, remembering the app for cooldown
    ///
    /// Events of any kind other than `WindowChanged` are ignored outright.
    pub fn decide(&self, event: &ForegroundEvent) -> Decision {
        if event.kind != EventKind::WindowChanged {
            trace!(kind = ?event.kind, "Ignoring non window-change event");
            return Decision::Ignore;
        }

        let app = match &event.app_id {
            Some(app) if !app.is_empty() => app,
            _ => {
                trace!("Window changed without an identifier");
                return Decision::Ignore;
            }
        };

        if is_os_chrome(app) {
            trace!(app_id = %app, "Ignoring OS chrome");
            return Decision::Ignore;
        }

        let verdict = {
            let mut state = self.lock();
            let now = self.clock.now();
            self.evaluate(&mut state, app, now)
        };

        match verdict {
            Verdict::Ignore => Decision::Ignore,
            Verdict::Suppress(reason) => Decision::suppress(reason),
            Verdict::Intervene(now) => self.intervene(app, now),
        }
    }

    fn evaluate(&self, state: &mut EngineState, app: &AppId, now: DateTime<Utc>) -> Verdict {
        if !state.boundaries.contains(app) {
            trace!(app_id = %app, "Not bounded");
            return Verdict::Ignore;
        }

        match state.grants.check(app, now) {
            GrantStatus::Live(expires_at) => {
                debug!(
                    app_id = %app,
                    %expires_at,
                    remaining_secs = (expires_at - now).num_seconds(),
                    "Temporary access active"
                );
                return Verdict::Suppress(SuppressReason::ActiveGrant);
            }
            GrantStatus::Expired(expires_at) => {
                debug!(app_id = %app, %expires_at, "Temporary access expired; grant removed");
            }
            GrantStatus::Absent => {}
        }

        match self.safety.protection(app) {
            Some(Protection::Host) => {
                warn!(app_id = %app, "Host application is bounded; refusing to intervene on itself");
                return Verdict::Suppress(SuppressReason::SafetyOverride);
            }
            Some(Protection::Critical) => {
                warn!(app_id = %app, "Critical system app is bounded; safety allow-list wins");
                return Verdict::Suppress(SuppressReason::SafetyOverride);
            }
            None => {}
        }

        if state.cooldown.is_cooling(app, now) {
            debug!(app_id = %app, "Duplicate window event inside cooldown window");
            return Verdict::Suppress(SuppressReason::Cooldown);
        }

        state.cooldown.record(app.clone(), now);
        Verdict::Intervene(now)
    }

    fn intervene(&self, app: &AppId, now: DateTime<Utc>) -> Decision {
        let notice = InterventionNotice::new(app.clone(), now);

        info!(
            app_id = %app,
            notice_id = %notice.notice_id,
            "Bounded app detected; requesting awareness moment"
        );

        match self.dispatcher.dispatch(&notice) {
            Ok(()) => Decision::Intervene { notice },
            Err(error) => {
                warn!(
                    app_id = %app,
                    notice_id = %notice.notice_id,
                    %error,
                    "Intervention dispatch failed; treating as suppressed"
                );
                self.lock().cooldown.rollback(app, now);
                Decision::suppress(SuppressReason::DispatchFailed)
            }
        }
    }

    /// Grant temporary access to `app`, returning the new expiry.
    ///
    /// The duration is `duration_override` when given, otherwise the
    /// configured grant-duration source, otherwise the engine default.
    /// Re-granting always overwrites the previous expiry.
    pub fn grant_temporary_access(
        &self,
        app: &AppId,
        duration_override: Option<Duration>,
    ) -> DateTime<Utc> {
        let duration = match duration_override {
            Some(duration) => duration,
            None => self.configured_grant_duration(),
        };

        let expires_at = {
            let mut state = self.lock();
            let now = self.clock.now();
            let expires_at = now
                .checked_add_signed(duration)
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            state.grants.grant(app.clone(), expires_at);
            expires_at
        };

        info!(
            app_id = %app,
            minutes = duration.num_minutes(),
            %expires_at,
            "Temporary access granted"
        );
        expires_at
    }

    fn configured_grant_duration(&self) -> Duration {
        let fallback = self.config.default_grant_duration();
        match self.durations.grant_minutes() {
            Ok(Some(value)) => minutes(value).unwrap_or_else(|| {
                warn!(value, "Configured grant duration is not usable; using default");
                fallback
            }),
            Ok(None) => fallback,
            Err(error) => {
                warn!(%error, "Grant duration unavailable; using default");
                fallback
            }
        }
    }

    /// Remove any grant for `app`. Returns whether one was removed.
    pub fn revoke_temporary_access(&self, app: &AppId) -> bool {
        let removed = self.lock().grants.revoke(app);
        if removed {
            info!(app_id = %app, "Temporary access revoked");
        } else {
            debug!(app_id = %app, "No temporary access to revoke");
        }
        removed
    }

    /// Snapshot of unexpired grants at call time.
    ///
    /// Read-only: expired entries are left in place for `decide` to collect.
    pub fn list_active_grants(&self) -> impl Iterator<Item = ActiveGrant> {
        let state = self.lock();
        let now = self.clock.now();
        state.grants.active(now).into_iter()
    }

    /// Swap the boundary set wholesale. Grants and cooldown are untouched.
    pub fn replace_boundary_set<I>(&self, apps: I)
    where
        I: IntoIterator<Item = AppId>,
    {
        let count = self.lock().boundaries.replace(apps);
        info!(bounded = count, "Boundary set replaced");
    }

    /// Sorted snapshot of the boundary set.
    pub fn bounded_apps(&self) -> Vec<AppId> {
        self.lock().boundaries.sorted()
    }

    pub fn is_bounded(&self, app: &AppId) -> bool {
        self.lock().boundaries.contains(app)
    }

    /// The app and instant of the most recent successful intervention, while
    /// it is still remembered for cooldown purposes.
    pub fn last_intervention(&self) -> Option<(AppId, DateTime<Utc>)> {
        self.lock()
            .cooldown
            .last()
            .map(|(app, at)| (app.clone(), at))
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
