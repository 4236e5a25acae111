//! Model table command

use anyhow::Result;
use colored::*;
use lumen_core::dto::job::GenerationKind;
use lumen_core::models::{default_slug, known_models};
use serde_json::{Map, Value as JsonValue, json};

/// Print the routing tables, optionally for one family only
pub fn show_models(family: Option<&str>, as_json: bool) -> Result<()> {
    let kinds = match family {
        Some(name) => vec![name.parse::<GenerationKind>().map_err(anyhow::Error::msg)?],
        None => GenerationKind::ALL.to_vec(),
    };

    if as_json {
        let tables: Map<String, JsonValue> = kinds
            .iter()
            .map(|kind| {
                let models: Map<String, JsonValue> = known_models(*kind)
                    .iter()
                    .map(|(name, slug)| (name.to_string(), json!(slug)))
                    .collect();
                (
                    kind.to_string(),
                    json!({ "default": default_slug(*kind), "models": models }),
                )
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(());
    }

    for kind in kinds {
        println!("{}", format!("{} models:", kind).bold());
        for (name, slug) in known_models(kind) {
            let marker = if *slug == default_slug(kind) {
                " (default)".green()
            } else {
                "".normal()
            };
            println!("  {:<22} {}{}", name.cyan(), slug.dimmed(), marker);
        }
        println!();
    }

    println!(
        "{}",
        "Unknown model names fall back to the family default.".dimmed()
    );
    Ok(())
}
