//! Field decoders that never fail on a wrong JSON type.
//!
//! A field of an unexpected type decodes as missing and the normalizer
//! decides what that means for the record.

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Text field: strings pass through, numbers are rendered, anything else is missing.
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(other) => {
            debug!(value = %other, "ignoring non-text field");
            None
        }
    })
}

/// Date field: strings pass through, integers are read as epoch milliseconds.
pub fn timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => number
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        Some(other) => {
            debug!(value = %other, "ignoring non-date field");
            None
        }
    })
}

/// Identifier field, decoded like [`string`].
pub fn id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: for<'a> From<&'a str>,
{
    Ok(string(deserializer)?.map(|text| T::from(text.as_str())))
}
