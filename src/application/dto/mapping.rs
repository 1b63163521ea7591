//! Babele mapping table - tells the translation module where each field lives

use serde::Serialize;
use serde_json::{json, Map, Value};

/// One mapping value
#[derive(Debug, Clone, PartialEq)]
pub enum MappingEntry {
    /// Bare source path, applied without a converter
    Path(String),
    /// Source path plus the converter that re-applies the translation
    Converter { path: String, converter: String },
    /// Nested table (adventure sub-collections)
    Table(MappingTable),
}

impl MappingEntry {
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    pub fn converter(path: impl Into<String>, converter: impl Into<String>) -> Self {
        Self::Converter {
            path: path.into(),
            converter: converter.into(),
        }
    }
}

impl From<MappingEntry> for Value {
    fn from(entry: MappingEntry) -> Self {
        match entry {
            MappingEntry::Path(path) => Value::String(path),
            MappingEntry::Converter { path, converter } => {
                json!({ "path": path, "converter": converter })
            }
            MappingEntry::Table(table) => Value::Object(table.entries),
        }
    }
}

/// Ordered field-to-source mapping
///
/// Serialized as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MappingTable {
    entries: Map<String, Value>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `field`, keeping its original position
    pub fn insert(&mut self, field: impl Into<String>, entry: MappingEntry) {
        self.entries.insert(field.into(), entry.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_serializes_in_insertion_order() {
        let mut mapping = MappingTable::new();
        mapping.insert("items", MappingEntry::converter("items", "adventure_items_converter"));
        mapping.insert("description", MappingEntry::path("system.description"));
        mapping.insert("scenes", MappingEntry::Table(MappingTable::new()));

        let json = serde_json::to_string(&mapping).expect("serialization should succeed");
        assert_eq!(
            json,
            r#"{"items":{"path":"items","converter":"adventure_items_converter"},"description":"system.description","scenes":{}}"#
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut mapping = MappingTable::new();
        mapping.insert("description", MappingEntry::path("system.description"));
        mapping.insert("actions", MappingEntry::path("system.actions"));
        mapping.insert("description", MappingEntry::path("description"));

        assert_eq!(
            serde_json::to_string(&mapping).expect("serialization should succeed"),
            r#"{"description":"description","actions":"system.actions"}"#
        );
    }

    #[test]
    fn test_nested_table_keeps_entries() {
        let mut actors = MappingTable::new();
        actors.insert("biography", MappingEntry::converter("system.details.biography", "biography_converter"));
        let mut mapping = MappingTable::new();
        mapping.insert("actors", MappingEntry::Table(actors));

        assert_eq!(
            serde_json::to_value(&mapping).expect("serialization should succeed"),
            json!({
                "actors": {
                    "biography": { "path": "system.details.biography", "converter": "biography_converter" }
                }
            })
        );
    }
}
