//! Operation result envelope
//!
//! Every gateway call is surfaced to downstream callers as either
//! `{"success": true, "value": ...}` or
//! `{"success": false, "error": {"kind": ..., "message": ...}}`.
//! Exactly one side is ever populated; the representation makes any other
//! shape unconstructible.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Failure classes a caller can tell apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Per-request abort or wait deadline elapsed
    Timeout,
    /// Non-2xx response from the remote
    RemoteHttpError,
    /// Connection-level failure
    NetworkError,
    /// The remote reports no such resource
    NotFound,
    /// 2xx response whose body could not be understood
    InvalidResponse,
    /// The call was rejected locally before reaching the remote
    InvalidRequest,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::RemoteHttpError => "remote_http_error",
            ErrorKind::NetworkError => "network_error",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidResponse => "invalid_response",
            ErrorKind::InvalidRequest => "invalid_request",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error side of the envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl ErrorInfo {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
        }
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "{} (status {}): {}", self.kind, code, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for ErrorInfo {}

/// Uniform success/error envelope
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult<T>(Result<T, ErrorInfo>);

impl<T> OperationResult<T> {
    pub fn ok(value: T) -> Self {
        Self(Ok(value))
    }

    pub fn err(error: ErrorInfo) -> Self {
        Self(Err(error))
    }

    pub fn is_success(&self) -> bool {
        self.0.is_ok()
    }

    pub fn value(&self) -> Option<&T> {
        self.0.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.0.as_ref().err()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationResult<U> {
        OperationResult(self.0.map(f))
    }

    pub fn into_result(self) -> Result<T, ErrorInfo> {
        self.0
    }
}

impl<T, E> From<Result<T, E>> for OperationResult<T>
where
    E: Into<ErrorInfo>,
{
    fn from(result: Result<T, E>) -> Self {
        Self(result.map_err(Into::into))
    }
}

impl<T: Serialize> Serialize for OperationResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OperationResult", 2)?;
        match &self.0 {
            Ok(value) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("value", value)?;
            }
            Err(error) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

#[derive(Deserialize)]
struct RawOperationResult<T> {
    success: bool,
    value: Option<T>,
    error: Option<ErrorInfo>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OperationResult<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawOperationResult::<T>::deserialize(deserializer)?;
        match (raw.success, raw.value, raw.error) {
            (true, Some(value), None) => Ok(Self::ok(value)),
            (false, None, Some(error)) => Ok(Self::err(error)),
            (true, _, _) => Err(de::Error::custom(
                "successful result must carry a value and no error",
            )),
            (false, _, _) => Err(de::Error::custom(
                "failed result must carry an error and no value",
            )),
        }
    }
}
