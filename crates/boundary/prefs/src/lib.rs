//! Boundary Prefs - persistence collaborator for the boundary engine.
//!
//! The engine itself never touches storage. This crate keeps the durable
//! bounded-app set, the grant-duration override, and the overlay bookkeeping
//! the host uses between the moment an intervention is dispatched and the
//! moment the friction task completes.

#![deny(unsafe_code)]

pub mod document;
pub mod duration;
pub mod error;
pub mod store;

pub use document::PrefsDocument;
pub use duration::PrefsDurationSource;
pub use error::{PrefsError, PrefsResult};
pub use store::{FilePreferences, InMemoryPreferences, Preferences};
