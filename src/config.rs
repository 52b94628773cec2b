//! Tracker configuration
//!
//! The API base URL is process-wide: `main` resolves it once and installs
//! it with [`install`]; everything else reads it through [`global`].

use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// CoinGecko public API base URL
pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// Default lookback window for the price change, in days
pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

/// Default currency looked up by the binary
pub const DEFAULT_CURRENCY_ID: &str = "bitcoin";

static GLOBAL_CONFIG: OnceLock<TrackerConfig> = OnceLock::new();

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("Configuration already installed")]
    AlreadyInstalled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// API base URL, validated http(s)
    base_url: Url,
    /// Whole-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(COINGECKO_API_BASE).expect("built-in base URL is valid"),
            timeout: None,
            user_agent: format!("crypto-tracker/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TrackerConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            ..Self::default()
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Validate an http(s) URL, dropping any trailing slash
fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(parsed)
}

/// Install the process-wide configuration. Only the first call succeeds.
pub fn install(config: TrackerConfig) -> Result<&'static TrackerConfig, ConfigError> {
    GLOBAL_CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInstalled)?;
    Ok(global())
}

/// The installed configuration, or the default if none was installed
pub fn global() -> &'static TrackerConfig {
    GLOBAL_CONFIG.get_or_init(TrackerConfig::default)
}
