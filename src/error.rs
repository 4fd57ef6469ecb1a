// The #[error] attribute from thiserror uses struct fields via string interpolation,
// but Rust's unused_assignments lint doesn't recognize this.
#![allow(unused_assignments)]

//! cloudnav Error Types with Error Codes
//!
//! Error code ranges:
//! - NAV-000-009: Configuration errors
//! - NAV-010-019: Terminal / TUI errors
//! - NAV-020-029: IO errors
//!
//! Errors raised inside views never reach this type: validation problems are
//! shown inline and API failures travel back as messages. `NavError` only
//! covers what can stop the process (startup, terminal, config).

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, NavError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Process-level errors.
///
/// Implements both `thiserror::Error` for std error compatibility
/// and `miette::Diagnostic` for fancy terminal error display.
#[derive(Error, Debug, Diagnostic)]
#[diagnostic(url(docsrs))]
pub enum NavError {
    // ═══════════════════════════════════════════
    // CONFIG ERRORS (000-009)
    // ═══════════════════════════════════════════
    #[error("[NAV-001] Configuration error: {reason}")]
    #[diagnostic(
        code(cloudnav::config_error),
        help("Check ~/.config/cloudnav/config.toml for syntax errors")
    )]
    ConfigError { reason: String },

    #[error("[NAV-002] No project selected")]
    #[diagnostic(
        code(cloudnav::missing_project),
        help("Pass --project, set CLOUDNAV_PROJECT, or add [project] to the config file")
    )]
    MissingProject,

    // ═══════════════════════════════════════════
    // TUI ERRORS (010-019)
    // ═══════════════════════════════════════════
    #[error("[NAV-010] TUI error: {reason}")]
    #[diagnostic(code(cloudnav::tui_error))]
    TuiError { reason: String },

    #[error("[NAV-011] Terminal too small: {width}x{height} (need at least {min_width}x{min_height})")]
    #[diagnostic(code(cloudnav::terminal_too_small))]
    TerminalTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },

    // ═══════════════════════════════════════════
    // IO ERRORS (020-029)
    // ═══════════════════════════════════════════
    #[error("[NAV-020] IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl NavError {
    /// Stable error code, e.g. `NAV-001`
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError { .. } => "NAV-001",
            Self::MissingProject => "NAV-002",
            Self::TuiError { .. } => "NAV-010",
            Self::TerminalTooSmall { .. } => "NAV-011",
            Self::IoError(_) => "NAV-020",
        }
    }
}

impl FixSuggestion for NavError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            NavError::ConfigError { .. } => {
                Some("Check ~/.config/cloudnav/config.toml for syntax errors")
            }
            NavError::MissingProject => Some("Run with --project <id>"),
            NavError::TuiError { .. } => Some("Check terminal compatibility and size"),
            NavError::TerminalTooSmall { .. } => Some("Resize the terminal window"),
            NavError::IoError(_) => None,
        }
    }
}
