//! Catalog resources exchanged with the service.
//!
//! Both resources are plain value snapshots. Unknown JSON keys are ignored
//! and missing keys take their zero value, so payloads from newer service
//! versions still decode.

mod author;
mod book;

pub use author::Author;
pub use book::Book;

use serde::{Deserialize, Deserializer};

/// Renders an optional string the way the `Display` impls expect.
pub(crate) fn or_null(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("null")
}

pub(crate) fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Accepts a JSON string, number or null and keeps it as a string.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    }))
}
