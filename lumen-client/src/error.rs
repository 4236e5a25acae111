//! Error types for the Lumen gateway

use lumen_core::dto::outcome::{ErrorInfo, ErrorKind};
use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Every way a gateway call can fail to produce an answer
///
/// A remote job that ended in `failed` is not represented here: that is a
/// successful read of an unsuccessful outcome.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No response within the deadline (per request or per wait)
    #[error("{message}")]
    Timeout { message: String },

    /// Remote returned a non-2xx status
    #[error("API error (status {status}): {message}")]
    RemoteHttp {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Remote reports no such resource
    #[error("{resource} not found: {message}")]
    NotFound { resource: String, message: String },

    /// Connection refused, DNS failure, TLS or body transfer failure
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Successful status but an unreadable body
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Rejected locally before anything was sent
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl GatewayError {
    /// Build the error for a non-2xx response
    ///
    /// `resource` names what was addressed (e.g. "job abc") and is only used
    /// for 404 responses.
    pub fn from_status(status: u16, body: &str, resource: &str) -> Self {
        let message = extract_message(status, body);
        if status == 404 {
            Self::NotFound {
                resource: resource.to_string(),
                message,
            }
        } else {
            Self::RemoteHttp { status, message }
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::RemoteHttp { .. } => ErrorKind::RemoteHttpError,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Network(_) => ErrorKind::NetworkError,
            Self::InvalidResponse(_) => ErrorKind::InvalidResponse,
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// HTTP status associated with the error, if the remote answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RemoteHttp { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(format!("request timed out: {}", err))
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err)
        }
    }
}

impl From<&GatewayError> for ErrorInfo {
    fn from(err: &GatewayError) -> Self {
        let message = match err {
            GatewayError::Timeout { message }
            | GatewayError::RemoteHttp { message, .. }
            | GatewayError::NotFound { message, .. } => message.clone(),
            other => other.to_string(),
        };
        let info = ErrorInfo::new(err.kind(), message);
        match err.status_code() {
            Some(code) => info.with_status(code),
            None => info,
        }
    }
}

impl From<GatewayError> for ErrorInfo {
    fn from(err: GatewayError) -> Self {
        ErrorInfo::from(&err)
    }
}

/// Pull a human message out of an error body
///
/// Looks for `message`, `error` (string or object with `message`) and
/// `detail`, then falls back to the raw text and finally the reason phrase.
fn extract_message(status: u16, body: &str) -> String {
    let body = body.trim();

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let candidates = [
            value.get("message"),
            value.get("error").and_then(|e| e.get("message")),
            value.get("error"),
            value.get("detail"),
        ];
        if let Some(text) = candidates
            .into_iter()
            .flatten()
            .find_map(|v| v.as_str().filter(|s| !s.is_empty()))
        {
            return text.to_string();
        }
    }

    if !body.is_empty() {
        return body.to_string();
    }

    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_json_fields() {
        assert_eq!(extract_message(400, r#"{"message":"bad prompt"}"#), "bad prompt");
        assert_eq!(extract_message(402, r#"{"error":"no credits"}"#), "no credits");
        assert_eq!(
            extract_message(422, r#"{"error":{"message":"width too large"}}"#),
            "width too large"
        );
        assert_eq!(extract_message(422, r#"{"detail":"invalid seed"}"#), "invalid seed");
    }

    #[test]
    fn test_message_falls_back_to_text_then_reason() {
        assert_eq!(extract_message(502, "upstream exploded"), "upstream exploded");
        assert_eq!(extract_message(503, ""), "Service Unavailable");
        assert_eq!(extract_message(500, r#"{"code":17}"#), r#"{"code":17}"#);
    }

    #[test]
    fn test_not_found_is_distinguishable() {
        let err = GatewayError::from_status(404, r#"{"message":"no such job"}"#, "job abc");
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "job abc not found: no such job");
    }

    #[test]
    fn test_remote_error_into_info() {
        let err = GatewayError::from_status(429, r#"{"message":"slow down"}"#, "job abc");
        let info = ErrorInfo::from(&err);
        assert_eq!(info.kind, ErrorKind::RemoteHttpError);
        assert_eq!(info.status_code, Some(429));
        assert_eq!(info.message, "slow down");
    }

    #[test]
    fn test_timeout_message_is_verbatim() {
        let err = GatewayError::timeout("job abc did not complete within 5s");
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "job abc did not complete within 5s");
        assert_eq!(ErrorInfo::from(err).kind, ErrorKind::Timeout);
    }
}
