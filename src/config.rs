//! Client configuration sourced from the environment.
//!
//! Variables:
//! - `CARDIO_API_URL`: backend base address (default `http://localhost:5000/api`)
//! - `CARDIO_LOG_MODE`: `auto` | `file` | `stdout` (default `auto`)
//! - `CARDIO_LOG_FILE`: log file path when logging to a file

use std::fs::{self, File, OpenOptions};
use std::path::Path;

use reqwest::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_LOG_FILE: &str = "saludcorazon.log";

const API_URL_ENV: &str = "CARDIO_API_URL";
const LOG_MODE_ENV: &str = "CARDIO_LOG_MODE";
const LOG_FILE_ENV: &str = "CARDIO_LOG_FILE";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid API base URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unknown log mode {0:?} (expected auto, file or stdout)")]
    InvalidLogMode(String),
}

/// Where log output goes.
///
/// Writing logs to the terminal corrupts the alternate screen, so `Auto`
/// picks a file when stdout is interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Resolve `Auto` against whether stdout is a terminal.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

impl std::str::FromStr for LogMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(Self::Auto),
            "file" => Ok(Self::File),
            "stdout" => Ok(Self::Stdout),
            other => Err(ConfigError::InvalidLogMode(other.to_string())),
        }
    }
}

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address every endpoint path is appended to.
    pub api_base_url: Url,
    pub log_mode: LogMode,
    pub log_file: String,
}

impl ClientConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns error if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns error if a value is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_base_url = parse_base_url(&raw_url)?;

        let log_mode = match lookup(LOG_MODE_ENV) {
            Some(v) => v.parse()?,
            None => LogMode::Auto,
        };

        let log_file = lookup(LOG_FILE_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        Ok(Self {
            api_base_url,
            log_mode,
            log_file,
        })
    }

    /// Open the log file for appending, creating its directory if needed.
    ///
    /// # Errors
    /// Returns error if the directory or file cannot be created.
    pub fn open_log_file(&self) -> crate::Result<File> {
        let path = Path::new(&self.log_file);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(file)
    }
}

/// Parse and normalize the base URL so that joining `login` yields `<base>/login`.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("not a base URL"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
