//! Utility functions module
//!
//! Serde helpers for request fields that may arrive either as JSON values or
//! as form-encoded strings, plus path checks used by the static file fallback.

use serde::{Deserialize, Deserializer};
use std::path::{Component, Path};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Deserializes an optional numeric id from a number, a numeric string, an
/// empty string or null. Empty values become `None`.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Int(v)) => i32::try_from(v)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("id out of range: {v}"))),
        Some(NumberOrText::Float(v)) => Err(D::Error::custom(format!("invalid id: {v}"))),
        Some(NumberOrText::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<i32>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid id: {s}")))
        }
    }
}

/// Deserializes optional free text that callers may also send as a number
/// (e.g. a class year of `2027`). Empty strings become `None`.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<NumberOrText>::deserialize(deserializer)? {
            None => None,
            Some(NumberOrText::Int(v)) => Some(v.to_string()),
            Some(NumberOrText::Float(v)) => Some(v.to_string()),
            Some(NumberOrText::Text(s)) if s.trim().is_empty() => None,
            Some(NumberOrText::Text(s)) => Some(s),
        },
    )
}

/// Checks that a request path maps to a location inside the served directory:
/// only plain components, no `..`, no roots and no backslashes.
pub fn is_safe_relative_path(path: &str) -> bool {
    !path.contains('\\')
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}
