//! Model routing tables
//!
//! Friendly model names accepted from callers mapped to the endpoint slugs
//! the remote API routes on. The tables are plain data; resolution is a
//! lookup, never a chain of conditionals.
//!
//! Unknown or missing names resolve to the family default and are flagged as
//! a fallback so callers can surface it.

use serde::Serialize;

use crate::dto::job::GenerationKind;

/// Slug used when an image model is missing or unknown
pub const DEFAULT_IMAGE_MODEL: &str = "flux/dev";
/// Slug used when a video model is missing or unknown
pub const DEFAULT_VIDEO_MODEL: &str = "kling/v1.6/standard";
/// Slug used when an enhancement model is missing or unknown
pub const DEFAULT_ENHANCE_MODEL: &str = "esrgan";
/// Base model slug used when a style training base is missing or unknown
pub const DEFAULT_STYLE_BASE_MODEL: &str = "flux-lora/fast-training";

static IMAGE_MODELS: &[(&str, &str)] = &[
    ("flux-schnell", "flux/schnell"),
    ("flux-dev", "flux/dev"),
    ("flux-pro", "flux-pro/v1.1"),
    ("flux-pro-ultra", "flux-pro/v1.1-ultra"),
    ("flux-lora", "flux-lora"),
    ("sdxl", "fast-sdxl"),
    ("recraft-v3", "recraft-v3"),
    ("ideogram-v2", "ideogram/v2"),
];

static VIDEO_MODELS: &[(&str, &str)] = &[
    ("kling-standard", "kling/v1.6/standard"),
    ("kling-pro", "kling/v1.6/pro"),
    ("luma-ray2", "luma/ray2"),
    ("minimax", "minimax/video-01"),
    ("hunyuan", "hunyuan-video"),
];

static ENHANCE_MODELS: &[(&str, &str)] = &[
    ("esrgan", "esrgan"),
    ("clarity", "clarity-upscaler"),
    ("creative", "creative-upscaler"),
    ("remove-background", "birefnet"),
];

static STYLE_BASE_MODELS: &[(&str, &str)] = &[
    ("flux-lora-fast", "flux-lora/fast-training"),
    ("flux-lora-portrait", "flux-lora/portrait-training"),
];

/// Outcome of resolving a friendly model name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelRoute {
    /// Endpoint slug to call
    pub slug: &'static str,
    /// Name the caller asked for, if any
    pub requested: Option<String>,
    /// True when the family default was substituted
    pub fallback: bool,
}

/// Routing table for a generation family
pub fn known_models(kind: GenerationKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        GenerationKind::Image => IMAGE_MODELS,
        GenerationKind::Video => VIDEO_MODELS,
        GenerationKind::Enhance => ENHANCE_MODELS,
        GenerationKind::StyleTraining => STYLE_BASE_MODELS,
    }
}

/// Documented default slug for a generation family
pub fn default_slug(kind: GenerationKind) -> &'static str {
    match kind {
        GenerationKind::Image => DEFAULT_IMAGE_MODEL,
        GenerationKind::Video => DEFAULT_VIDEO_MODEL,
        GenerationKind::Enhance => DEFAULT_ENHANCE_MODEL,
        GenerationKind::StyleTraining => DEFAULT_STYLE_BASE_MODEL,
    }
}

/// Resolve a friendly model name for a family
///
/// Lookups are case-insensitive. A name that is already a known slug is
/// accepted as-is.
pub fn resolve(kind: GenerationKind, model: Option<&str>) -> ModelRoute {
    let requested = model.map(str::trim).filter(|m| !m.is_empty());

    let found = requested.and_then(|name| {
        known_models(kind)
            .iter()
            .find(|(friendly, slug)| {
                friendly.eq_ignore_ascii_case(name) || slug.eq_ignore_ascii_case(name)
            })
            .map(|(_, slug)| *slug)
    });

    ModelRoute {
        slug: found.unwrap_or_else(|| default_slug(kind)),
        requested: requested.map(str::to_string),
        fallback: found.is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_resolve_known_model() {
        let route = resolve(GenerationKind::Image, Some("flux-pro"));
        assert_eq!(route.slug, "flux-pro/v1.1");
        assert!(!route.fallback);
        assert_eq!(route.requested.as_deref(), Some("flux-pro"));
    }

    #[test]
    fn test_resolve_is_case_insensitive_and_accepts_slugs() {
        assert_eq!(resolve(GenerationKind::Video, Some("Kling-Pro")).slug, "kling/v1.6/pro");
        let route = resolve(GenerationKind::Video, Some("luma/ray2"));
        assert_eq!(route.slug, "luma/ray2");
        assert!(!route.fallback);
    }

    #[test]
    fn test_unknown_model_falls_back_to_family_default() {
        let route = resolve(GenerationKind::Image, Some("midjourney"));
        assert_eq!(route.slug, DEFAULT_IMAGE_MODEL);
        assert!(route.fallback);
        assert_eq!(route.requested.as_deref(), Some("midjourney"));

        let route = resolve(GenerationKind::Enhance, None);
        assert_eq!(route.slug, DEFAULT_ENHANCE_MODEL);
        assert!(route.fallback);
        assert!(route.requested.is_none());
    }

    #[test]
    fn test_model_from_other_family_is_not_borrowed() {
        let route = resolve(GenerationKind::Video, Some("flux-dev"));
        assert_eq!(route.slug, DEFAULT_VIDEO_MODEL);
        assert!(route.fallback);
    }

    #[test]
    fn test_defaults_are_listed_in_their_tables() {
        for kind in GenerationKind::ALL {
            let slugs: Vec<_> = known_models(kind).iter().map(|(_, slug)| *slug).collect();
            assert!(slugs.contains(&default_slug(kind)), "{} default missing", kind);
        }
    }

    #[test]
    fn test_friendly_names_are_unique_per_family() {
        for kind in GenerationKind::ALL {
            let names: HashSet<_> = known_models(kind).iter().map(|(name, _)| *name).collect();
            assert_eq!(names.len(), known_models(kind).len());
        }
    }
}
