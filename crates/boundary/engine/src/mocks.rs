use std::sync::{Mutex, PoisonError};

use boundary_types::InterventionNotice;

use crate::config::GrantDurationSource;
use crate::dispatch::{OverlaySurface, PresentationChannel};
use crate::error::{ConfigReadError, DispatchError};

/// Presenter that records everything it is asked to do.
///
/// Implements both presentation traits so one instance can back a dispatcher.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    notified: Mutex<Vec<InterventionNotice>>,
    overlays: Mutex<Vec<InterventionNotice>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notified(&self) -> Vec<InterventionNotice> {
        self.notified
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn overlays(&self) -> Vec<InterventionNotice> {
        self.overlays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PresentationChannel for RecordingPresenter {
    fn app_bounded(&self, notice: &InterventionNotice) -> Result<(), DispatchError> {
        self.notified
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
        Ok(())
    }
}

impl OverlaySurface for RecordingPresenter {
    fn request_overlay(&self, notice: &InterventionNotice) -> Result<(), DispatchError> {
        self.overlays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
        Ok(())
    }
}

/// Channel whose notifications always fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingChannel;

impl PresentationChannel for FailingChannel {
    fn app_bounded(&self, _notice: &InterventionNotice) -> Result<(), DispatchError> {
        Err(DispatchError::ChannelUnavailable("mock channel detached".into()))
    }
}

/// Overlay surface that can never be shown.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingOverlay;

impl OverlaySurface for FailingOverlay {
    fn request_overlay(&self, _notice: &InterventionNotice) -> Result<(), DispatchError> {
        Err(DispatchError::OverlayUnavailable("mock overlay refused".into()))
    }
}

/// Duration source whose reads always fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingDurationSource;

impl GrantDurationSource for FailingDurationSource {
    fn grant_minutes(&self) -> Result<Option<i64>, ConfigReadError> {
        Err(ConfigReadError::Unavailable("mock preferences offline".into()))
    }
}
