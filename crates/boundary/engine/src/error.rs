use thiserror::Error;

/// Failure to hand an intervention to the presentation layer.
///
/// Never retried by the engine: the next foreground event re-evaluates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("presentation channel unavailable: {0}")]
    ChannelUnavailable(String),

    #[error("presentation channel is full")]
    ChannelFull,

    #[error("overlay surface could not be shown: {0}")]
    OverlayUnavailable(String),
}

/// Failure to read the grant-duration override.
///
/// Always recovered by falling back to the compiled-in default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigReadError {
    #[error("grant duration unavailable: {0}")]
    Unavailable(String),
}
