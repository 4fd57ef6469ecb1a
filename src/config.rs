//! cloudnav Configuration Module
//!
//! Manages persistent defaults for the browser.
//! Config is stored in `~/.config/cloudnav/config.toml`.
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. Command line flags (`--project`)
//! 2. Environment variables (`CLOUDNAV_PROJECT`)
//! 3. Config file (`~/.config/cloudnav/config.toml`)
//! 4. Defaults

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};

/// Environment variable overriding the configured project id
pub const PROJECT_ENV: &str = "CLOUDNAV_PROJECT";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NavConfig {
    /// Project the browser opens on
    #[serde(default)]
    pub project: ProjectConfig,

    /// UI timing knobs
    #[serde(default)]
    pub ui: UiConfig,
}

/// Project selection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    /// Project identifier sent to the API
    pub id: Option<String>,

    /// Human readable name shown in the header
    pub name: Option<String>,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Redraw / housekeeping interval in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// How long a notification stays in the footer, in seconds
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_notification_secs() -> u64 {
    4
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            notification_secs: default_notification_secs(),
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }
}

/// Project the session runs against, after all overrides are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSelection {
    pub id: String,
    pub name: String,
}

impl NavConfig {
    /// Get the config directory path
    ///
    /// Returns `~/.config/cloudnav/` on Unix, `%APPDATA%/cloudnav/` on Windows
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cloudnav")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from file
    ///
    /// Returns default config if file doesn't exist.
    /// Returns error if file exists but is malformed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| NavError::ConfigError {
            reason: format!("Failed to read config file: {}", e),
        })?;

        toml::from_str(&content).map_err(|e| NavError::ConfigError {
            reason: format!("Failed to parse config file: {}", e),
        })
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to file
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| NavError::ConfigError {
                    reason: format!("Failed to create config directory: {}", e),
                })?;
            }
        }

        let content = toml::to_string_pretty(self).map_err(|e| NavError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, content).map_err(|e| NavError::ConfigError {
            reason: format!("Failed to write config file: {}", e),
        })?;

        Ok(())
    }

    /// Merge with environment variables
    ///
    /// Environment variables take precedence over config file values.
    pub fn with_env(mut self) -> Self {
        if let Ok(project) = std::env::var(PROJECT_ENV) {
            if !project.is_empty() {
                self.project.id = Some(project);
            }
        }
        self
    }

    /// Resolve the project to open, applying a command line override.
    ///
    /// The display name falls back to the id when none is configured or
    /// when the id was overridden.
    pub fn resolve_project(&self, cli_project: Option<&str>) -> Result<ProjectSelection> {
        if let Some(id) = cli_project.filter(|id| !id.is_empty()) {
            let name = match (&self.project.id, &self.project.name) {
                (Some(cfg_id), Some(name)) if cfg_id == id => name.clone(),
                _ => id.to_string(),
            };
            return Ok(ProjectSelection {
                id: id.to_string(),
                name,
            });
        }

        let id = self
            .project
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or(NavError::MissingProject)?;
        let name = self.project.name.clone().unwrap_or_else(|| id.clone());
        Ok(ProjectSelection { id, name })
    }
}
