//! Job DTOs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::listing::{Pagination, normalize_filter};

/// Generation family a submission targets
///
/// Each family maps to its own group of remote endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationKind {
    Image,
    Video,
    Enhance,
    StyleTraining,
}

impl GenerationKind {
    pub const ALL: [GenerationKind; 4] = [
        GenerationKind::Image,
        GenerationKind::Video,
        GenerationKind::Enhance,
        GenerationKind::StyleTraining,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GenerationKind::Image => "image",
            GenerationKind::Video => "video",
            GenerationKind::Enhance => "enhance",
            GenerationKind::StyleTraining => "style_training",
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "image" => Ok(GenerationKind::Image),
            "video" => Ok(GenerationKind::Video),
            "enhance" | "upscale" => Ok(GenerationKind::Enhance),
            "style_training" | "style" => Ok(GenerationKind::StyleTraining),
            other => Err(format!("unknown generation kind: {}", other)),
        }
    }
}

/// Request to create a job on the remote side
///
/// `parameters` are opaque to the gateway and forwarded as the request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub kind: GenerationKind,
    /// Friendly model name, resolved through the routing tables
    pub model: Option<String>,
    pub parameters: serde_json::Map<String, serde_json::Value>,
    /// Address the remote notifies on completion
    pub callback_url: Option<String>,
}

impl SubmitRequest {
    pub fn new(kind: GenerationKind) -> Self {
        Self {
            kind,
            model: None,
            parameters: serde_json::Map::new(),
            callback_url: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_callback(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Body sent to the remote: the parameters plus the optional webhook
    pub fn body(&self) -> serde_json::Value {
        let mut body = self.parameters.clone();
        if let Some(callback) = &self.callback_url {
            body.insert(
                "webhook_url".to_string(),
                serde_json::Value::String(callback.clone()),
            );
        }
        serde_json::Value::Object(body)
    }
}

/// Filters for the remote job listing
///
/// `status` and `kind` are kept as caller strings so the `"all"` sentinel can
/// be recognized and dropped before it reaches the remote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub status: Option<String>,
    pub kind: Option<String>,
    pub page: Pagination,
}

impl JobFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.page.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.page.offset = Some(offset);
        self
    }

    /// Outbound query parameters
    ///
    /// `"all"` or blank status/type filters are omitted; pagination is
    /// forwarded as given.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = normalize_filter(self.status.as_deref()) {
            pairs.push(("status", status));
        }
        if let Some(kind) = normalize_filter(self.kind.as_deref()) {
            pairs.push(("type", kind));
        }
        pairs.extend(self.page.query_pairs());
        pairs
    }
}
