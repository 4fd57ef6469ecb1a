//! cloudnav - keyboard-driven terminal browser for cloud resources

pub mod api;
pub mod config;
pub mod error;
pub mod tui;

pub use api::{CloudApi, MockCloud};
pub use config::NavConfig;
pub use error::{FixSuggestion, NavError, Result};
