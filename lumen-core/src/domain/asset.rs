//! Asset domain model
//!
//! Represents a file held in the remote asset store (uploads and generation
//! outputs).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored media file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Remote identifier
    pub id: String,

    /// Public locator of the file
    pub url: String,

    /// Media classification ("image", "video", ...)
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Original file name, when the remote kept one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Size of the stored file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,

    pub created_at: DateTime<Utc>,
}
