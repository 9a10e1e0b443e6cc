//! Runtime configuration read from the environment.

use std::path::PathBuf;
use thiserror::Error;

/// Overrides the directory holding the menu and history files.
pub const DATA_DIR_ENV: &str = "MENUBOARD_DATA_DIR";
/// `tracing` filter directive for the log file, e.g. `debug` or `menuboard=trace`.
pub const LOG_FILTER_ENV: &str = "MENUBOARD_LOG";

const APP_DIR_NAME: &str = "menuboard";
const DEFAULT_LOG_FILTER: &str = "info";
const LOG_FILE_NAME: &str = "menuboard.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot determine the system data directory; set MENUBOARD_DATA_DIR")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Unset and blank variables both fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let data_dir = match non_blank(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .ok_or(ConfigError::NoDataDir)?
                .join(APP_DIR_NAME),
        };

        let log_filter = non_blank(LOG_FILTER_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self { data_dir, log_filter })
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}
