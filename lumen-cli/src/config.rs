//! Configuration module
//!
//! Turns CLI settings into the gateway the commands share.

use std::time::Duration;

use anyhow::{Context, Result};
use lumen_client::{GatewayConfig, HttpGateway};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote API
    pub api_url: String,
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
    pub callback_url: Option<String>,
    /// Emit JSON envelopes instead of human output
    pub json: bool,
}

impl Config {
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            api_key: self.api_key.clone().filter(|k| !k.trim().is_empty()),
            request_timeout: Duration::from_secs(self.request_timeout),
            callback_url: self.callback_url.clone().filter(|u| !u.trim().is_empty()),
            ..GatewayConfig::new(self.api_url.clone())
        }
    }

    /// Build the one gateway every command in this process uses
    pub fn gateway(&self) -> Result<HttpGateway> {
        HttpGateway::new(self.gateway_config()).context("Invalid gateway configuration")
    }
}
