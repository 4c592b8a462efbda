//! Optional TOML configuration.
//!
//! Looked up at `--config`, else `<data dir>/config.toml` when present.
//! Command-line flags override anything set here.
//!
//! ```toml
//! data_dir = "/home/me/autodidact"
//! default_project = "typography"
//! max_backups = 10
//!
//! [schedule]
//! offsets = [1, 3, 7, 14, 30]
//!
//! [focus]
//! lengths = [25, 50, 90]
//! session_type = "read"
//!
//! [server]
//! addr = "127.0.0.1:8080"
//! ```

use anyhow::{Context, Result};
use autodidact_core::{FocusLengths, Schedule, DEFAULT_PROJECT, DEFAULT_SESSION_TYPE};
use autodidact_json::{paths, DEFAULT_MAX_BACKUPS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub data_dir: Option<PathBuf>,
    pub default_project: String,
    pub max_backups: usize,
    pub schedule: ScheduleConfig,
    pub focus: FocusConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleConfig {
    pub offsets: Schedule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FocusConfig {
    pub lengths: FocusLengths,
    pub session_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_project: DEFAULT_PROJECT.to_string(),
            max_backups: DEFAULT_MAX_BACKUPS,
            schedule: ScheduleConfig::default(),
            focus: FocusConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            lengths: FocusLengths::default(),
            session_type: DEFAULT_SESSION_TYPE.to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl AppConfig {
    /// An explicit path must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => (paths::default_config_file(), false),
        };
        if !required && !path.is_file() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg = Self::from_toml_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
