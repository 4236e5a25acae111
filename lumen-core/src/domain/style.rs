//! Style domain model
//!
//! A style is a trained LoRA adapter that generations can reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A trained or training style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub id: String,
    pub name: String,

    /// Remote training state ("training", "ready", "failed", ...)
    pub status: String,

    /// Prompt token that activates the style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_word: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Style {
    pub fn is_ready(&self) -> bool {
        self.status.eq_ignore_ascii_case("ready")
    }
}
