//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_STORAGE_PATH: &str = ".jobboard/storage.json";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
    #[error("{var} is not a whole number of seconds: {value}")]
    InvalidSeconds { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash.
    pub api_base_url: String,
    /// Location of the durable key-value file.
    pub storage_path: PathBuf,
    /// Whole-request timeout. `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            request_timeout: None,
            connect_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `JOBBOARD_API_BASE_URL`: default `http://localhost:8000/api/v1`
    /// - `JOBBOARD_STORAGE_PATH`: default `.jobboard/storage.json`
    /// - `JOBBOARD_REQUEST_TIMEOUT_SECS`: unset means no timeout
    /// - `JOBBOARD_CONNECT_TIMEOUT_SECS`: unset means no timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is blank or a timeout is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is blank or a timeout is not a number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = match lookup("JOBBOARD_API_BASE_URL") {
            Some(raw) => normalize_base_url(&raw).ok_or(ConfigError::Empty { var: "JOBBOARD_API_BASE_URL" })?,
            None => DEFAULT_API_BASE_URL.to_owned(),
        };
        let storage_path = lookup("JOBBOARD_STORAGE_PATH")
            .filter(|p| !p.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);

        Ok(Self {
            api_base_url,
            storage_path,
            request_timeout: parse_secs("JOBBOARD_REQUEST_TIMEOUT_SECS", lookup("JOBBOARD_REQUEST_TIMEOUT_SECS"))?,
            connect_timeout: parse_secs("JOBBOARD_CONNECT_TIMEOUT_SECS", lookup("JOBBOARD_CONNECT_TIMEOUT_SECS"))?,
        })
    }

    /// Replace the base URL, normalising it the same way the environment
    /// value is.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is blank.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_base_url = normalize_base_url(raw).ok_or(ConfigError::Empty { var: "JOBBOARD_API_BASE_URL" })?;
        Ok(self)
    }

    /// Join an API path (leading slash optional) onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

/// Trim whitespace and trailing slashes; `None` when nothing is left.
pub(crate) fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

fn parse_secs(var: &'static str, raw: Option<String>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u64>()
        .map(|secs| Some(Duration::from_secs(secs)))
        .map_err(|_| ConfigError::InvalidSeconds { var, value: raw.clone() })
}
