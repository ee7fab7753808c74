use std::time::Duration;

use maquila_core::presentation::{AssetUrls, DEFAULT_API_ORIGIN};

/// Default HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
///
/// Missing or malformed values fall back to the defaults; loading never
/// fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend network origin, without a trailing slash.
    pub api_url: String,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `API_URL`              | `http://localhost:8081` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("API_URL").ok().as_deref(),
            std::env::var("REQUEST_TIMEOUT_SECS").ok().as_deref(),
        )
    }

    /// Build from raw (possibly absent) values.
    pub fn from_values(api_url: Option<&str>, request_timeout_secs: Option<&str>) -> Self {
        let api_url = AssetUrls::from_origin(api_url).base().to_string();
        let request_timeout_secs = request_timeout_secs
            .and_then(|v| v.trim().parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Self {
            api_url,
            request_timeout_secs,
        }
    }

    /// Override the origin, keeping the other settings.
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = AssetUrls::from_origin(Some(api_url)).base().to_string();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// URL builder bound to the same origin the client talks to.
    pub fn asset_urls(&self) -> AssetUrls {
        AssetUrls::new(&self.api_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_ORIGIN.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
