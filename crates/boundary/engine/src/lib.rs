//! Boundary Engine - the bounded-app access control core.
//!
//! Consumes foreground-change events and decides, per event, whether to
//! ignore it, suppress it, or request an intervention from the presentation
//! layer. Manages time-boxed grants earned by completing a friction task.
//!
//! ## Components
//!
//! - **Boundary Store** (`store.rs`): the user's bounded apps, replaced wholesale.
//! - **Grant Ledger** (`ledger.rs`): app → expiry, with lazy expiry on read.
//! - **Cooldown Tracker** (`cooldown.rs`): last intervention, suppresses event bursts.
//! - **Safety Allow-list** (`safety.rs`): host app and critical system apps, never intercepted.
//! - **Decision Engine** (`engine.rs`): the ordered rule chain.
//! - **Intervention Dispatcher** (`dispatch.rs`): notifies the presentation
//!   layer and requests an overlay surface.
//!
//! The engine is advisory and best-effort. Nothing here terminates the
//! process: malformed events are ignored, dispatch failures degrade to a
//! suppression, and configuration read failures fall back to defaults.

#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod cooldown;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod mocks;
pub mod safety;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DefaultDuration, EngineConfig, FixedMinutes, GrantDurationSource};
pub use cooldown::CooldownTracker;
pub use dispatch::{InterventionDispatcher, OverlaySurface, PresentationChannel};
pub use engine::BoundaryEngine;
pub use error::{ConfigReadError, DispatchError};
pub use ledger::{GrantLedger, GrantStatus};
pub use safety::{is_os_chrome, Protection, SafetyAllowList, CRITICAL_APPS, OS_CHROME};
pub use store::BoundarySet;

pub use boundary_types::{
    ActiveGrant, AppId, Decision, EventKind, ForegroundEvent, InterventionNotice, SuppressReason,
};
