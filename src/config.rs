//! Runtime configuration from `WARDCAST_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("WARDCAST_API_URL must start with http:// or https:// (got {0:?})")]
    InvalidApiUrl(String),

    #[error("WARDCAST_HTTP_TIMEOUT_SECS must be a positive integer (got {0:?})")]
    InvalidTimeout(String),
}

/// Settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL without a trailing slash
    pub api_url: String,
    /// Where downloaded reports are written
    pub report_dir: PathBuf,
    /// Per-request timeout; `None` waits indefinitely
    pub http_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            report_dir: PathBuf::from("."),
            http_timeout: None,
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("WARDCAST_API_URL").filter(|v| !v.trim().is_empty()) {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidApiUrl(url.to_string()));
            }
            config.api_url = url.trim_end_matches('/').to_string();
        }

        if let Some(dir) = lookup("WARDCAST_REPORT_DIR").filter(|v| !v.trim().is_empty()) {
            config.report_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup("WARDCAST_HTTP_TIMEOUT_SECS").filter(|v| !v.trim().is_empty()) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&s| s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.http_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
