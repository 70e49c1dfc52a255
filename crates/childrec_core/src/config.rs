//! Runtime configuration resolved from environment variables.
//!
//! | Variable             | Default                 |
//! |----------------------|-------------------------|
//! | `CHILDREC_DB_PATH`   | `database.db`           |
//! | `CHILDREC_LOG_LEVEL` | `default_log_level()`   |
//! | `CHILDREC_LOG_DIR`   | unset (logging skipped) |
//!
//! Blank values are treated as unset.

use crate::logging::{default_log_level, init_logging, LoggingError};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "CHILDREC_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "CHILDREC_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "CHILDREC_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "database.db";

/// Core runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            db_path: read(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            log_level: read(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }

    /// Replaces the database path, e.g. from a command-line flag.
    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }

    /// Starts file logging when `log_dir` is configured.
    ///
    /// Returns `Ok(false)` when logging is not configured.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        let Some(log_dir) = self.log_dir.as_ref() else {
            return Ok(false);
        };
        let log_dir = log_dir.to_str().ok_or_else(|| {
            LoggingError::InvalidLogDir(format!("not valid UTF-8: `{}`", log_dir.display()))
        })?;
        init_logging(&self.log_level, log_dir)?;
        Ok(true)
    }
}
