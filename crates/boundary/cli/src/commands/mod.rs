//! CLI command implementations

pub mod apps;
pub mod duration;
pub mod replay;
pub mod run;
