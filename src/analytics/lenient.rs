//! Tolerant field decoders for survey data.
//!
//! Survey payloads are validated on write, but stored journeys can still carry
//! values of the wrong shape (an older client, a hand-edited document). A bad
//! field decodes as absent so the rest of the journey stays readable.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

fn raw<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer)
}

/// Decode any JSON number, treating every other value as absent.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(raw(deserializer)?.and_then(|v| v.as_f64()))
}

/// Decode an integral JSON number.
pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(raw(deserializer)?.and_then(|v| v.as_i64()))
}

/// Decode a JSON boolean, treating every other value as absent.
pub fn boolean<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(raw(deserializer)?.and_then(|v| v.as_bool()))
}

/// Decode an optional string; non-strings are absent.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match raw(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Decode a string label through `FromStr`; unknown labels are absent.
pub fn label<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    Ok(raw(deserializer)?
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok()))
}

/// Decode a nested object; a value of the wrong shape is absent.
pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(raw(deserializer)?.and_then(|v| serde_json::from_value(v).ok()))
}

/// Decode a list, dropping entries that fail to decode.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match raw(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
