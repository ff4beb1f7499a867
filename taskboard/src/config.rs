//! Configuration loading using Figment.
//!
//! Sources are merged in precedence order (later sources override earlier ones):
//! 1. Default values (hardcoded)
//! 2. A config file: the explicit path if one is given, otherwise the first of
//!    `taskboard.toml`, `taskboard.yaml`, `taskboard.yml`, `taskboard.json`
//!    found in the working directory
//! 3. Environment variables prefixed `TASKBOARD_`, with `__` separating
//!    nested keys (`TASKBOARD_SESSION__LOGIN_DELAY_MS=0`)

use crate::error::{Result, TaskboardError};
use crate::types::{Label, LabelCatalog};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, trace};

/// Base name of discovered config files
pub const CONFIG_FILE_STEM: &str = "taskboard";
/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "TASKBOARD_";

const CONFIG_EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskboardConfig {
    pub session: SessionConfig,
    /// Label catalog offered to the presentation layer
    pub labels: Vec<Label>,
}

impl Default for TaskboardConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            labels: LabelCatalog::default().labels().to_vec(),
        }
    }
}

/// Session store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Simulated login round-trip
    pub login_delay_ms: u64,
    /// Simulated logout round-trip
    pub logout_delay_ms: u64,
    /// Where the user record is persisted; the CLI picks a data-dir default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_delay_ms: 1000,
            logout_delay_ms: 500,
            user_file: None,
        }
    }
}

impl SessionConfig {
    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    pub fn logout_delay(&self) -> Duration {
        Duration::from_millis(self.logout_delay_ms)
    }

    /// No simulated delays; handy for tests and scripted use
    pub fn immediate() -> Self {
        Self {
            login_delay_ms: 0,
            logout_delay_ms: 0,
            user_file: None,
        }
    }
}

impl TaskboardConfig {
    /// Load configuration relative to the current directory
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::load_from(&cwd, explicit)
    }

    /// Load configuration, discovering config files in `dir`
    pub fn load_from(dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let figment = Self::build_figment(dir, explicit)?;
        let config: Self = figment.extract()?;
        debug!(
            login_delay_ms = config.session.login_delay_ms,
            logout_delay_ms = config.session.logout_delay_ms,
            labels = config.labels.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    pub fn label_catalog(&self) -> LabelCatalog {
        LabelCatalog::new(self.labels.clone())
    }

    fn build_figment(dir: &Path, explicit: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let file = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(TaskboardError::invalid_value(
                        "config",
                        format!("config file not found: {}", path.display()),
                    ));
                }
                Some(path.to_path_buf())
            }
            None => discover(dir),
        };

        if let Some(path) = file {
            trace!("loading config file {}", path.display());
            figment = merge_file(figment, &path)?;
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }
}

fn discover(dir: &Path) -> Option<PathBuf> {
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{CONFIG_FILE_STEM}.{ext}")))
        .find(|path| path.is_file())
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "toml" => Ok(figment.merge(Toml::file(path))),
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        "json" => Ok(figment.merge(Json::file(path))),
        other => Err(TaskboardError::invalid_value(
            "config",
            format!("unsupported config format '{other}'"),
        )),
    }
}
