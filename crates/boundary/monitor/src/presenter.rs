use boundary_engine::{DispatchError, OverlaySurface, PresentationChannel};
use boundary_types::InterventionNotice;
use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::trace;

/// What the presentation layer is asked to do.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PresenterMessage {
    /// An app was bounded; the UI may update its state.
    AppBounded(InterventionNotice),
    /// Put the friction task on screen.
    OverlayRequested(InterventionNotice),
}

impl PresenterMessage {
    pub fn notice(&self) -> &InterventionNotice {
        match self {
            Self::AppBounded(notice) | Self::OverlayRequested(notice) => notice,
        }
    }
}

/// Presentation collaborator backed by a bounded tokio channel.
///
/// Never waits: a full queue or a dropped receiver is a dispatch failure.
#[derive(Clone, Debug)]
pub struct ChannelPresenter {
    tx: mpsc::Sender<PresenterMessage>,
}

impl ChannelPresenter {
    /// Create a presenter and the receiving end the UI consumes.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<PresenterMessage>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    fn send(&self, message: PresenterMessage) -> Result<(), TrySendError<PresenterMessage>> {
        trace!(?message, "Queueing presenter message");
        self.tx.try_send(message)
    }
}

impl PresentationChannel for ChannelPresenter {
    fn app_bounded(&self, notice: &InterventionNotice) -> Result<(), DispatchError> {
        self.send(PresenterMessage::AppBounded(notice.clone()))
            .map_err(|error| match error {
                TrySendError::Full(_) => DispatchError::ChannelFull,
                TrySendError::Closed(_) => {
                    DispatchError::ChannelUnavailable("presenter receiver dropped".to_string())
                }
            })
    }
}

impl OverlaySurface for ChannelPresenter {
    fn request_overlay(&self, notice: &InterventionNotice) -> Result<(), DispatchError> {
        self.send(PresenterMessage::OverlayRequested(notice.clone()))
            .map_err(|error| match error {
                TrySendError::Full(_) => DispatchError::ChannelFull,
                TrySendError::Closed(_) => {
                    DispatchError::OverlayUnavailable("presenter receiver dropped".to_string())
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boundary_types::AppId;
    use chrono::Utc;

    fn notice() -> InterventionNotice {
        InterventionNotice::new(AppId::new("social.app"), Utc::now())
    }

    #[tokio::test]
    async fn test_messages_arrive_in_order() {
        let (presenter, mut rx) = ChannelPresenter::channel(4);
        let notice = notice();

        presenter.app_bounded(&notice).unwrap();
        presenter.request_overlay(&notice).unwrap();

        assert_eq!(
            rx.recv().await,
            Some(PresenterMessage::AppBounded(notice.clone()))
        );
        assert_eq!(
            rx.recv().await,
            Some(PresenterMessage::OverlayRequested(notice))
        );
    }

    #[test]
    fn test_full_queue_is_reported() {
        let (presenter, _rx) = ChannelPresenter::channel(1);
        presenter.app_bounded(&notice()).unwrap();
        assert_eq!(
            presenter.request_overlay(&notice()),
            Err(DispatchError::ChannelFull)
        );
    }

    #[test]
    fn test_dropped_receiver_fails_overlay() {
        let (presenter, rx) = ChannelPresenter::channel(1);
        drop(rx);
        assert!(matches!(
            presenter.request_overlay(&notice()),
            Err(DispatchError::OverlayUnavailable(_))
        ));
        assert!(matches!(
            presenter.app_bounded(&notice()),
            Err(DispatchError::ChannelUnavailable(_))
        ));
    }

    #[test]
    fn test_message_json_is_tagged() {
        let json = serde_json::to_value(PresenterMessage::OverlayRequested(notice())).unwrap();
        assert_eq!(json["type"], "overlay_requested");
        assert_eq!(json["app_id"], "social.app");
    }
}
