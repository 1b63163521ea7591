//! Document entity - One game entity exported from a compendium
//!
//! Documents are heterogeneous trees (actors own items, adventures own
//! actors, journals and scenes...), so they are kept as raw JSON and read
//! through dot-paths instead of being mapped onto fixed structs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A document as produced by the host's `toObject()`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Value);

impl Document {
    pub fn new(data: Value) -> Self {
        Self(data)
    }

    /// Display name, empty when the document has none
    pub fn name(&self) -> &str {
        self.0.get("name").and_then(Value::as_str).unwrap_or_default()
    }

    /// The `type` discriminator (item sub-type such as `talent` or `spell`)
    pub fn sub_type(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Resolve a dot-path inside a JSON tree
///
/// Objects are indexed by key and arrays by numeric segment. Any missing or
/// non-container intermediate yields `None`, as does an empty path segment.
pub fn get_property<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }

    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
