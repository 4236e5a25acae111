//! Lumen HTTP Gateway
//!
//! A typed client for the remote generative-media API. Every call returns a
//! [`Result`] whose error side is the uniform [`GatewayError`] taxonomy, and
//! [`wait`] turns a submitted job into a terminal one by polling.
//!
//! # Example
//!
//! ```no_run
//! use lumen_client::{GatewayConfig, HttpGateway, WaitOptions, submit_and_wait};
//! use lumen_core::dto::job::{GenerationKind, SubmitRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let gateway = HttpGateway::new(GatewayConfig::new("http://localhost:9000"))?;
//!
//!     let request = SubmitRequest::new(GenerationKind::Image)
//!         .with_model("flux-dev")
//!         .with_param("prompt", "a lighthouse at dusk");
//!
//!     let job = submit_and_wait(&gateway, &request, Some(WaitOptions::default())).await?;
//!     println!("{} finished as {}", job.id, job.status);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod gateway;
mod jobs;
mod library;
pub mod wait;

// Re-export commonly used types
pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use gateway::JobGateway;
pub use wait::{WaitOptions, submit_and_wait, wait, wait_for_terminal};

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP implementation of the gateway
///
/// Cheap to clone; holds no state beyond its configuration and the reqwest
/// client. Connections are acquired per call and never held across a wait.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    /// Parsed base URL of the remote API
    base: Url,
    /// Bearer token, if configured
    api_key: Option<String>,
    /// Default webhook for submissions
    callback_url: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl HttpGateway {
    /// Create a gateway from configuration
    ///
    /// The configured request timeout is applied to every HTTP call.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GatewayError::InvalidRequest(format!("failed to build HTTP client: {}", e)))?;

        Self::with_client(config, client)
    }

    /// Create a gateway with a preconfigured reqwest client
    ///
    /// Timeouts, proxies and TLS settings come from `client`;
    /// `config.request_timeout` is not applied.
    pub fn with_client(config: GatewayConfig, client: Client) -> Result<Self> {
        config.validate()?;
        let trimmed = config.base_url.trim().trim_end_matches('/');
        let base = Url::parse(trimmed)
            .map_err(|e| GatewayError::InvalidRequest(format!("invalid base_url `{}`: {}", trimmed, e)))?;

        if base.cannot_be_a_base() {
            return Err(GatewayError::InvalidRequest(format!(
                "base_url `{}` cannot carry a path",
                trimmed
            )));
        }

        Ok(Self {
            base,
            api_key: config.api_key,
            callback_url: config.callback_url,
            client,
        })
    }

    /// Base URL of the remote API, without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    // =============================================================================
    // Request Helpers
    // =============================================================================

    /// Build an endpoint URL from path segments
    ///
    /// Each segment is percent-escaped, so ids can never introduce extra path
    /// components.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {}", method, url);
        let builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");

        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    ///
    /// `resource` names the addressed entity for not-found errors.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T> {
        let response = Self::check_status(response, resource).await?;
        let bytes = response.bytes().await?;

        serde_json::from_slice(&bytes)
            .map_err(|e| GatewayError::InvalidResponse(format!("failed to parse JSON response: {}", e)))
    }

    /// Handle a delete response
    ///
    /// A 404 means the resource is already gone and yields `Ok(false)`.
    async fn handle_delete_response(&self, response: reqwest::Response, resource: &str) -> Result<bool> {
        match Self::check_status(response, resource).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found() => {
                debug!("{} already deleted", resource);
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    async fn check_status(response: reqwest::Response, resource: &str) -> Result<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                debug!("Failed to read error body for {}: {}", resource, err);
                String::new()
            }
        };
        Err(GatewayError::from_status(status.as_u16(), &body, resource))
    }
}

pub(crate) fn require_id<'a>(id: &'a str, what: &str) -> Result<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(GatewayError::InvalidRequest(format!("{} id cannot be empty", what)));
    }
    Ok(id)
}
