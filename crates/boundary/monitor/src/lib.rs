//! Boundary Monitor - the long-lived service around the decision engine.
//!
//! The monitor provides:
//! - Layered configuration (defaults, file, `BOUNDARY_*` environment)
//! - A tokio channel presenter for the presentation layer
//! - Overlay bookkeeping and task completion against durable preferences
//! - A JSON line protocol shared by the command-line front ends

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod input;
pub mod presenter;
pub mod service;

pub use config::{LoggingConfig, MonitorConfig, PrefsConfig, PresenterConfig};
pub use error::{MonitorError, MonitorResult};
pub use input::{MonitorInput, MonitorOutput};
pub use presenter::{ChannelPresenter, PresenterMessage};
pub use service::MonitorService;
