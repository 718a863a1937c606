//! Runtime configuration from the command line and environment.
//!
//! ```text
//! livescroll-articles [TOPIC]
//!
//!   NYT_API_KEY               Article Search API key (required)
//!   LIVESCROLL_BASE_URL       endpoint root override
//!   LIVESCROLL_TIMEOUT_SECS   per-request timeout, default 10
//!   LIVESCROLL_LOG            tracing filter, default "info"
//! ```

use std::time::Duration;

use thiserror::Error;

use crate::source::DEFAULT_BASE_URL;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("NYT_API_KEY is not set; get a key at https://developer.nytimes.com")]
    MissingApiKey,

    #[error("LIVESCROLL_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    /// Optional query scoping the paginated feed.
    pub topic: Option<String>,
    pub timeout: Duration,
    pub log_filter: String,
}

impl Config {
    /// Read the process arguments and environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_parts(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Build a config from positional arguments (program name already
    /// skipped) and an environment lookup.
    pub fn from_parts<I, F>(mut args: I, env: F) -> Result<Self, ConfigError>
    where
        I: Iterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = non_blank("NYT_API_KEY").ok_or(ConfigError::MissingApiKey)?;

        let timeout = match non_blank("LIVESCROLL_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
        };

        let topic = args
            .next()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            api_key,
            base_url: non_blank("LIVESCROLL_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            topic,
            timeout,
            log_filter: non_blank("LIVESCROLL_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.into()),
        })
    }
}
