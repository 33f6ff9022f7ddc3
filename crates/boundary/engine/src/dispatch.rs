use std::sync::Arc;

use boundary_types::InterventionNotice;
use tracing::{debug, warn};

use crate::error::DispatchError;

/// Notification side of the presentation layer ("an app was bounded").
///
/// Implementations must not block.
pub trait PresentationChannel: Send + Sync {
    fn app_bounded(&self, notice: &InterventionNotice) -> Result<(), DispatchError>;
}

/// Surface side of the presentation layer: puts the friction task on screen.
///
/// Implementations must not block.
pub trait OverlaySurface: Send + Sync {
    fn request_overlay(&self, notice: &InterventionNotice) -> Result<(), DispatchError>;
}

/// Hands an intervention to the presentation layer.
///
/// The channel notification is best-effort: a failure is logged and the
/// overlay is still requested. Only an overlay failure fails the dispatch.
#[derive(Clone)]
pub struct InterventionDispatcher {
    channel: Option<Arc<dyn PresentationChannel>>,
    overlay: Arc<dyn OverlaySurface>,
}

impl InterventionDispatcher {
    pub fn new(channel: Arc<dyn PresentationChannel>, overlay: Arc<dyn OverlaySurface>) -> Self {
        Self {
            channel: Some(channel),
            overlay,
        }
    }

    /// Dispatcher with no notification channel attached.
    pub fn overlay_only(overlay: Arc<dyn OverlaySurface>) -> Self {
        Self {
            channel: None,
            overlay,
        }
    }

    pub fn dispatch(&self, notice: &InterventionNotice) -> Result<(), DispatchError> {
        match &self.channel {
            Some(channel) => {
                if let Err(error) = channel.app_bounded(notice) {
                    warn!(
                        app_id = %notice.app_id,
                        notice_id = %notice.notice_id,
                        %error,
                        "presentation channel notification failed; requesting overlay anyway"
                    );
                }
            }
            None => debug!(app_id = %notice.app_id, "no presentation channel attached"),
        }

        self.overlay.request_overlay(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{FailingChannel, FailingOverlay, RecordingPresenter};
    use boundary_types::AppId;
    use chrono::Utc;

    fn notice() -> InterventionNotice {
        InterventionNotice::new(AppId::new("social.app"), Utc::now())
    }

    #[test]
    fn notifies_then_requests_overlay() {
        let presenter = Arc::new(RecordingPresenter::new());
        let dispatcher = InterventionDispatcher::new(presenter.clone(), presenter.clone());

        dispatcher.dispatch(&notice()).unwrap();

        assert_eq!(presenter.notified().len(), 1);
        assert_eq!(presenter.overlays().len(), 1);
    }

    #[test]
    fn channel_failure_does_not_fail_dispatch() {
        let presenter = Arc::new(RecordingPresenter::new());
        let dispatcher = InterventionDispatcher::new(Arc::new(FailingChannel), presenter.clone());

        assert!(dispatcher.dispatch(&notice()).is_ok());
        assert_eq!(presenter.overlays().len(), 1);
    }

    #[test]
    fn overlay_failure_fails_dispatch() {
        let presenter = Arc::new(RecordingPresenter::new());
        let dispatcher = InterventionDispatcher::new(presenter.clone(), Arc::new(FailingOverlay));

        let err = dispatcher.dispatch(&notice()).unwrap_err();
        assert!(matches!(err, DispatchError::OverlayUnavailable(_)));
        assert_eq!(presenter.notified().len(), 1);
    }
}
