//! Listing DTOs shared by jobs, assets and styles

use serde::{Deserialize, Serialize};

/// Sentinel callers use to mean "no filter"; the remote API does not know it
pub const ALL_SENTINEL: &str = "all";

/// One page of a remote listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// Pagination passed through to the remote unmodified
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Pagination {
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self { limit, offset }
    }

    /// Outbound `limit`/`offset` query parameters
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

/// Map a caller-supplied filter value to what the remote understands
///
/// `"all"` (any case) and blank values mean the filter is omitted entirely.
pub fn normalize_filter(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(ALL_SENTINEL) {
        None
    } else {
        Some(value.to_string())
    }
}

/// Filters for the remote asset listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetFilter {
    pub kind: Option<String>,
    pub page: Pagination,
}

impl AssetFilter {
    /// Outbound query parameters, with `"all"` mapped to omission
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(kind) = normalize_filter(self.kind.as_deref()) {
            pairs.push(("type", kind));
        }
        pairs.extend(self.page.query_pairs());
        pairs
    }
}
