//! API client configuration.
//!
//! One base URL for the whole backend; every path in the REST surface is
//! joined onto it. Override via environment variables or explicit
//! construction for staging/testing.

use url::Url;

/// Default API base when `AREG_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";

/// Configuration for connecting to the register backend.
///
/// `Debug` masks any password embedded in the base URL.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL that `/records`, `/auth/...` are appended to.
    pub api_base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Configuration for `api_base_url` with the default timeout.
    pub fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            timeout_secs: 30,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `AREG_API_URL` (default: `http://127.0.0.1:5000/api`)
    /// - `AREG_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: env_url("AREG_API_URL", DEFAULT_API_URL)?,
            timeout_secs: std::env::var("AREG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Configuration pointing at a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be parsed.
    pub fn local_mock(port: u16) -> Result<Self, ConfigError> {
        let url = Url::parse(&format!("http://127.0.0.1:{port}"))
            .map_err(|e| ConfigError::InvalidUrl("localhost".to_string(), e.to_string()))?;
        Ok(Self {
            api_base_url: url,
            timeout_secs: 5,
        })
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut url = self.api_base_url.clone();
        if url.password().is_some() {
            let _ = url.set_password(Some("REDACTED"));
        }
        f.debug_struct("ClientConfig")
            .field("api_base_url", &url.as_str())
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_base_url(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e))
}

/// Parse a base URL, rejecting forms that cannot have paths appended.
pub fn parse_base_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() {
        return Err(format!("{raw} cannot be used as a base URL"));
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
