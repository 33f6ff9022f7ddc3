//! The per-process monitor service.
//!
//! Owns the wiring between the foreground event source, the decision engine,
//! preferences, and the presentation queue. Constructed once and shared; there
//! is no global instance.

use std::collections::BTreeSet;
use std::sync::Arc;

use boundary_engine::{BoundaryEngine, Clock, InterventionDispatcher};
use boundary_prefs::{Preferences, PrefsDurationSource};
use boundary_types::{ActiveGrant, AppId, Decision, ForegroundEvent};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::config::MonitorConfig;
use crate::error::MonitorResult;
use crate::input::{window_event, MonitorInput, MonitorOutput};
use crate::presenter::{ChannelPresenter, PresenterMessage};

/// Bridges platform events, the engine, and durable preferences.
#[derive(Clone)]
pub struct MonitorService {
    engine: Arc<BoundaryEngine>,
    prefs: Arc<dyn Preferences>,
}

impl MonitorService {
    pub fn new(engine: Arc<BoundaryEngine>, prefs: Arc<dyn Preferences>) -> Self {
        Self { engine, prefs }
    }

    /// Assemble an engine that dispatches onto a [`ChannelPresenter`] and
    /// reads grant durations from `prefs`.
    ///
    /// Returns the service and the receiver the presentation layer drains.
    pub fn from_config(
        config: &MonitorConfig,
        prefs: Arc<dyn Preferences>,
        clock: Arc<dyn Clock>,
    ) -> (Self, mpsc::Receiver<PresenterMessage>) {
        let (presenter, rx) = ChannelPresenter::channel(config.presenter.channel_capacity);
        let presenter = Arc::new(presenter);
        let dispatcher = InterventionDispatcher::new(presenter.clone(), presenter);

        let engine = BoundaryEngine::new(config.engine.clone(), dispatcher)
            .with_clock(clock)
            .with_duration_source(Arc::new(PrefsDurationSource::new(prefs.clone())));

        (Self::new(Arc::new(engine), prefs), rx)
    }

    pub fn engine(&self) -> &Arc<BoundaryEngine> {
        &self.engine
    }

    pub fn prefs(&self) -> &Arc<dyn Preferences> {
        &self.prefs
    }

    /// Load the durable boundary set and clear overlay state left over from a
    /// previous session. Returns the number of bounded apps loaded.
    pub fn start(&self) -> usize {
        let apps = self.prefs.load_bounded_apps().unwrap_or_else(|error| {
            warn!(%error, "Could not load bounded apps; starting with none");
            Vec::new()
        });
        let count = apps.len();
        self.engine.replace_boundary_set(apps);

        if let Err(error) = self.prefs.set_overlay_active(false) {
            warn!(%error, "Could not clear stale overlay flag");
        }

        info!(bounded = count, "Monitor started");
        count
    }

    /// Evaluate one foreground event and record overlay bookkeeping when an
    /// intervention went out.
    pub fn handle_event(&self, event: &ForegroundEvent) -> Decision {
        let decision = self.engine.decide(event);

        if let Decision::Intervene { notice } = &decision {
            let app = notice.app_id.0.clone();
            let recorded = self.prefs.update(&mut |doc| {
                doc.last_bounded_package = Some(app.clone());
                doc.is_overlay_active = true;
            });
            if let Err(error) = recorded {
                warn!(app_id = %notice.app_id, %error, "Could not record intervention");
            }
        }

        decision
    }

    /// Persist a new bounded-app set, then apply it to the engine.
    pub fn update_bounded_apps<I>(&self, apps: I) -> MonitorResult<usize>
    where
        I: IntoIterator<Item = AppId>,
    {
        let apps: Vec<AppId> = apps
            .into_iter()
            .filter(|app| !app.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        self.prefs.save_bounded_apps(&apps)?;
        let count = apps.len();
        self.engine.replace_boundary_set(apps);
        Ok(count)
    }

    /// The friction task closed. On success the last intervened app earns
    /// temporary access. The overlay flag is cleared either way.
    #[instrument(skip(self))]
    pub fn complete_task(&self, success: bool) -> Option<ActiveGrant> {
        let grant = if success {
            match self.prefs.last_bounded_app() {
                Ok(Some(app)) => {
                    let expires_at = self.engine.grant_temporary_access(&app, None);
                    Some(ActiveGrant {
                        app_id: app,
                        expires_at,
                    })
                }
                Ok(None) => {
                    warn!("Task completed but no bounded app is on record");
                    None
                }
                Err(error) => {
                    warn!(%error, "Could not read last bounded app");
                    None
                }
            }
        } else {
            debug!("Task abandoned");
            None
        };

        self.clear_overlay_flag();
        grant
    }

    /// The overlay never made it on screen, or was closed without a task.
    pub fn overlay_dismissed_without_launch(&self) {
        self.clear_overlay_flag();
    }

    fn clear_overlay_flag(&self) {
        if let Err(error) = self.prefs.set_overlay_active(false) {
            warn!(%error, "Could not clear overlay flag");
        }
    }

    /// Carry out one line-protocol request.
    pub fn apply(&self, input: MonitorInput) -> MonitorOutput {
        match input {
            MonitorInput::Window { package, kind } => {
                let event = window_event(package.as_deref(), kind);
                MonitorOutput::Decision {
                    package,
                    decision: self.handle_event(&event),
                }
            }
            MonitorInput::TaskCompleted { success } => MonitorOutput::TaskCompleted {
                grant: self.complete_task(success),
            },
            MonitorInput::OverlayDismissed => {
                self.overlay_dismissed_without_launch();
                MonitorOutput::OverlayDismissed
            }
            MonitorInput::Revoke { package } => {
                let removed = self.engine.revoke_temporary_access(&AppId::from(package.as_str()));
                MonitorOutput::Revoked { package, removed }
            }
            MonitorInput::Grants => MonitorOutput::Grants {
                grants: self.engine.list_active_grants().collect(),
            },
            MonitorInput::SetBounded { packages } => {
                match self.update_bounded_apps(packages.into_iter().map(AppId::new)) {
                    Ok(count) => MonitorOutput::Bounded { count },
                    Err(error) => MonitorOutput::Error {
                        message: error.to_string(),
                    },
                }
            }
        }
    }

    /// Process foreground events one at a time until every sender is gone.
    /// Returns how many events were handled.
    ///
    /// Each event is decided on the blocking pool, since recording an
    /// intervention may write the preferences file. The next event is not
    /// taken until the previous one has finished.
    pub async fn run(&self, mut events: mpsc::Receiver<ForegroundEvent>) -> usize {
        let mut handled = 0;
        while let Some(event) = events.recv().await {
            let service = self.clone();
            let decided = tokio::task::spawn_blocking(move || {
                let decision = service.handle_event(&event);
                (event, decision)
            })
            .await;
            match decided {
                Ok((event, decision)) => {
                    debug!(?event, ?decision, "Event handled");
                    handled += 1;
                }
                Err(error) => warn!(%error, "Event handler panicked"),
            }
        }
        info!(handled, "Event source closed");
        handled
    }
}
