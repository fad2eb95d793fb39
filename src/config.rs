// Locating the task file

use crate::storage::DEFAULT_TASKS_FILE;
use eyre::{Context, Result};
use serde::Deserialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the task file location
pub const TASKS_FILE_ENV: &str = "TASKTRACK_FILE";

/// Settings read from `<config_dir>/tasktrack/config.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Task file to use when neither the flag nor the environment names one
    pub tasks_file: Option<PathBuf>,
}

impl Config {
    /// Default config file location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tasktrack").join("config.yaml"))
    }

    /// Load the config from the default location; no config file means defaults
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load the config from `path`; a missing file yields defaults, a malformed one is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(file = ?path, "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Config =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config file {:?}", path))?;

        debug!(file = ?path, ?config, "Loaded config");
        Ok(config)
    }

    /// Pick the task file: flag, then environment, then config, then `tasks.json`
    pub fn resolve_tasks_path(&self, flag: Option<PathBuf>, env: Option<OsString>) -> PathBuf {
        flag.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
            .or_else(|| self.tasks_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TASKS_FILE))
    }
}

/// Pick the task file, reading the config only when flag and environment are unset
///
/// A broken config file does not get in the way of an explicit path.
pub fn resolve_tasks_path<F>(flag: Option<PathBuf>, env: Option<OsString>, load_config: F) -> Result<PathBuf>
where
    F: FnOnce() -> Result<Config>,
{
    let env = env.filter(|v| !v.is_empty());
    if flag.is_some() || env.is_some() {
        return Ok(Config::default().resolve_tasks_path(flag, env));
    }
    Ok(load_config()?.resolve_tasks_path(None, None))
}
