//! Generation parameter parsing

use anyhow::Result;
use serde_json::{Map, Value as JsonValue};

/// Parse a single key=value pair
///
/// The value is read as JSON when it parses (numbers, booleans, arrays) and
/// kept as a plain string otherwise.
pub fn parse_key_val(s: &str) -> Result<(String, JsonValue)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow::anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;

    let key = s[..pos].trim();
    if key.is_empty() {
        anyhow::bail!("invalid KEY=value: empty key in `{}`", s);
    }

    let raw = &s[pos + 1..];
    let value = serde_json::from_str(raw).unwrap_or_else(|_| JsonValue::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Collect parameters into the request map
///
/// Entries from `named` (dedicated flags) are inserted first; `-p` pairs
/// override them.
pub fn build_parameters(
    named: impl IntoIterator<Item = (&'static str, Option<JsonValue>)>,
    extra: Vec<(String, JsonValue)>,
) -> Map<String, JsonValue> {
    let mut parameters: Map<String, JsonValue> = named
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
        .collect();

    parameters.extend(extra);
    parameters
}
