//! Helpers for query string parameters

use serde::{Deserialize, Deserializer, de};

/// Numeric id parameter where an empty value (`?plant=`) means unset.
pub(crate) fn optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid id `{}`", value))),
    }
}
