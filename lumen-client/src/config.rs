//! Gateway configuration
//!
//! Connection settings for the remote media API. The per-request timeout
//! configured here is independent from the wait-loop budget in
//! [`crate::wait::WaitOptions`].

use std::time::Duration;

use crate::error::{GatewayError, Result};

pub const DEFAULT_API_URL: &str = "https://api.lumen.dev";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the remote API (e.g., "https://api.lumen.dev")
    pub base_url: String,

    /// Bearer token sent with every request
    pub api_key: Option<String>,

    /// Abort a single HTTP call after this long
    pub request_timeout: Duration,

    /// Default completion webhook for submissions that do not name one
    pub callback_url: Option<String>,

    pub user_agent: String,
}

impl GatewayConfig {
    /// Creates a new configuration with defaults
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            callback_url: None,
            user_agent: concat!("lumen/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(invalid("base_url cannot be empty"));
        }

        if !is_http_url(&self.base_url) {
            return Err(invalid("base_url must start with http:// or https://"));
        }

        if self.request_timeout.is_zero() {
            return Err(invalid("request_timeout must be greater than 0"));
        }

        if let Some(callback) = &self.callback_url {
            if !is_http_url(callback) {
                return Err(invalid("callback_url must start with http:// or https://"));
            }
        }

        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn invalid(message: &str) -> GatewayError {
    GatewayError::InvalidRequest(message.to_string())
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = GatewayConfig::default();

        config.base_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.base_url = "http://localhost:9000".to_string();
        assert!(config.validate().is_ok());

        config.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());

        config.request_timeout = Duration::from_secs(5);
        config.callback_url = Some("ftp://hooks".to_string());
        assert!(config.validate().is_err());

        config.callback_url = Some("https://hooks.example.com/lumen".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = GatewayConfig::new("http://localhost:9000")
            .with_api_key("sk-test")
            .with_request_timeout(Duration::from_secs(3))
            .with_callback_url("http://localhost:9001/hook");

        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.callback_url.as_deref(), Some("http://localhost:9001/hook"));
    }
}
