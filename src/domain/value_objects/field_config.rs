//! Export configuration - which nested fields of each document type are translatable
//!
//! The serialized form uses the same camelCase keys as the Babele export
//! macros, so a configuration block generated by the detector (or written by
//! hand for a module) can be dropped into the configuration file unchanged:
//!
//! ```json
//! {
//!   "talent": [
//!     { "field": "actions", "path": "system.actions", "converter": "actions_converter",
//!       "subFields": ["name", "description", "condition"], "idKey": "id", "isItemAction": true }
//!   ],
//!   "default": []
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Element key used when a field configuration does not name one
pub const DEFAULT_ID_KEY: &str = "id";

/// Configuration key consulted when a type has no entry of its own
pub const DEFAULT_CONFIG_KEY: &str = "default";

/// Declarative rule for one nested field of a document type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    /// Key under which the translation is emitted
    pub field: String,
    /// Dot-path into the document
    pub path: String,
    /// Symbolic name of the Babele converter that re-applies the translation
    #[serde(default)]
    pub converter: String,
    #[serde(default)]
    pub sub_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_key: Option<String>,
    /// `path` holds a single record rather than an array of elements
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_direct_object: bool,
    /// The actor's owned items, walked structurally
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_actor_item: bool,
    /// Item actions, walked structurally by the item extractor
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_item_action: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl FieldConfig {
    pub fn new(
        field: impl Into<String>,
        path: impl Into<String>,
        converter: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            path: path.into(),
            converter: converter.into(),
            sub_fields: Vec::new(),
            id_key: None,
            is_direct_object: false,
            is_actor_item: false,
            is_item_action: false,
        }
    }

    pub fn with_sub_fields<I, S>(mut self, sub_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub_fields = sub_fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_id_key(mut self, id_key: impl Into<String>) -> Self {
        self.id_key = Some(id_key.into());
        self
    }

    pub fn direct_object(mut self) -> Self {
        self.is_direct_object = true;
        self
    }

    pub fn actor_items(mut self) -> Self {
        self.is_actor_item = true;
        self
    }

    pub fn item_actions(mut self) -> Self {
        self.is_item_action = true;
        self
    }

    /// Element key, falling back to `id`
    pub fn id_key_or_default(&self) -> &str {
        self.id_key.as_deref().unwrap_or(DEFAULT_ID_KEY)
    }

    /// Handled by the tree walker itself rather than by a declared converter
    pub fn is_structural(&self) -> bool {
        self.is_actor_item || self.is_item_action
    }

    pub fn has_converter(&self) -> bool {
        !self.converter.trim().is_empty()
    }
}

/// Field configurations keyed by document type or item sub-type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportConfig {
    types: BTreeMap<String, Vec<FieldConfig>>,
}

impl ExportConfig {
    /// A configuration with only the empty `default` entry
    pub fn empty() -> Self {
        let mut types = BTreeMap::new();
        types.insert(DEFAULT_CONFIG_KEY.to_string(), Vec::new());
        Self { types }
    }

    pub fn with_type(mut self, key: impl Into<String>, configs: Vec<FieldConfig>) -> Self {
        self.types.insert(key.into(), configs);
        self
    }

    /// Configurations for `key`, or the `default` entry when it has none
    pub fn configs_for(&self, key: &str) -> &[FieldConfig] {
        self.types
            .get(key)
            .or_else(|| self.types.get(DEFAULT_CONFIG_KEY))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Configurations applied to actors, including those nested in adventures
    pub fn actor_configs(&self) -> &[FieldConfig] {
        self.configs_for("Actor")
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        let item_actions = || {
            vec![FieldConfig::new("actions", "system.actions", "actions_converter")
                .with_sub_fields(["name", "description", "condition"])
                .with_id_key("id")
                .item_actions()]
        };

        Self::empty()
            .with_type("talent", item_actions())
            .with_type("spell", item_actions())
            .with_type(
                "Actor",
                vec![
                    FieldConfig::new("items", "items", "adventure_items_converter")
                        .with_sub_fields(["name", "description"])
                        .with_id_key("name")
                        .actor_items(),
                    FieldConfig::new(
                        "biography",
                        "system.details.biography",
                        "biography_converter",
                    )
                    .with_sub_fields(["public", "private"])
                    .direct_object(),
                ],
            )
            .with_type(
                "JournalEntry",
                vec![FieldConfig::new("categories", "categories", "categories_converter")
                    .with_sub_fields(["name"])
                    .with_id_key("_id")],
            )
            .with_type("Adventure", Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configs_for_falls_back_to_default() {
        let config = ExportConfig::default();

        assert_eq!(config.configs_for("talent").len(), 1);
        assert!(config.configs_for("weapon").is_empty());
    }

    #[test]
    fn test_configs_for_without_default_entry() {
        let config: ExportConfig =
            serde_json::from_str(r#"{"spell": []}"#).expect("deserialization should succeed");
        assert!(config.configs_for("armor").is_empty());
    }

    #[test]
    fn test_field_config_reads_camel_case() {
        let json = r#"{
            "field": "actions",
            "path": "system.actions",
            "converter": "actions_converter",
            "subFields": ["name", "condition"],
            "idKey": "_id",
            "isItemAction": true
        }"#;

        let config: FieldConfig = serde_json::from_str(json).expect("deserialization should succeed");

        assert_eq!(config.sub_fields, vec!["name", "condition"]);
        assert_eq!(config.id_key_or_default(), "_id");
        assert!(config.is_structural());
        assert!(!config.is_direct_object);
    }

    #[test]
    fn test_id_key_defaults_to_id() {
        let config = FieldConfig::new("categories", "categories", "categories_converter");
        assert_eq!(config.id_key_or_default(), "id");
    }

    #[test]
    fn test_serialization_skips_unset_flags() {
        let config = FieldConfig::new("categories", "categories", "categories_converter")
            .with_sub_fields(["name"]);
        let json = serde_json::to_string(&config).expect("serialization should succeed");

        assert!(json.contains("\"subFields\""));
        assert!(!json.contains("isDirectObject"));
        assert!(!json.contains("idKey"));
    }
}
