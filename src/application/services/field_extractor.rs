//! Field extraction - Turns one document into a flat translation record
//!
//! Every document yields at least `{name}`. The description and item actions
//! are read structurally; everything else comes from the type's
//! [`FieldConfig`] list. Blank strings are treated as absent throughout, and
//! a configured path holding data of the wrong shape is simply skipped.

use serde_json::{json, Map, Value};

use crate::domain::entities::get_property;
use crate::domain::value_objects::{id_string, non_blank, FieldConfig, TranslationRecord};

/// Members of a structured description that carry text
const DESCRIPTION_VARIANTS: [&str; 3] = ["public", "private", "value"];

/// Translatable members of an item action
const ACTION_FIELDS: [&str; 3] = ["name", "description", "condition"];

const DESCRIPTION_PATH: &str = "system.description";
const ACTIONS_PATH: &str = "system.actions";

/// Extract `{name, description?, actions?}` from an item-like document
pub fn extract_item_translation(doc: &Value) -> TranslationRecord {
    let mut record = TranslationRecord::new();
    record.insert("name".to_string(), Value::String(document_name(doc).to_string()));

    if let Some(description) = extract_description(get_property(doc, DESCRIPTION_PATH)) {
        record.insert("description".to_string(), description);
    }

    if let Some(actions) = extract_actions(get_property(doc, ACTIONS_PATH)) {
        record.insert("actions".to_string(), actions);
    }

    record
}

/// Apply the non-structural field configurations of a type to `record`
pub fn apply_configured_fields(doc: &Value, configs: &[FieldConfig], record: &mut TranslationRecord) {
    for config in configs.iter().filter(|config| !config.is_structural()) {
        let Some(value) = get_property(doc, &config.path) else {
            continue;
        };

        let extracted = if config.is_direct_object {
            extract_direct_object(value, &config.sub_fields)
        } else {
            extract_keyed_elements(value, config.id_key_or_default(), &config.sub_fields)
        };

        if let Some(extracted) = extracted {
            record.insert(config.field.clone(), extracted);
        }
    }
}

/// A description is either plain text or a record of visibility variants
///
/// A record keeps its shape even when a single variant survives.
pub fn extract_description(value: Option<&Value>) -> Option<Value> {
    let value = value?;
    match value {
        Value::String(_) => non_blank(Some(value)).map(|text| Value::String(text.to_string())),
        Value::Object(variants) => {
            let kept = copy_non_blank(variants, &DESCRIPTION_VARIANTS);
            (!kept.is_empty()).then_some(Value::Object(kept))
        }
        _ => None,
    }
}

/// Item actions keyed by their `id`
fn extract_actions(value: Option<&Value>) -> Option<Value> {
    let actions = value?.as_array()?;
    let mut translated = Map::new();

    for action in actions {
        let Some(id) = id_string(action.get("id")) else {
            continue;
        };
        let Some(fields) = action.as_object() else {
            continue;
        };

        let mut entry = copy_non_blank(fields, &ACTION_FIELDS);

        if let Some(effects) = action
            .get("effects")
            .and_then(Value::as_array)
            .filter(|effects| !effects.is_empty())
        {
            let named: Vec<Value> = effects
                .iter()
                .filter_map(|effect| non_blank(effect.get("name")))
                .map(|name| json!({ "name": name }))
                .collect();
            if !named.is_empty() {
                entry.insert("effects".to_string(), Value::Array(named));
            }
        }

        if !entry.is_empty() {
            translated.insert(id, Value::Object(entry));
        }
    }

    (!translated.is_empty()).then_some(Value::Object(translated))
}

/// Copy the configured sub-fields of a single nested record
fn extract_direct_object<S: AsRef<str>>(value: &Value, sub_fields: &[S]) -> Option<Value> {
    let kept = copy_non_blank(value.as_object()?, sub_fields);
    (!kept.is_empty()).then_some(Value::Object(kept))
}

/// Build an id-keyed mapping from an array of records
fn extract_keyed_elements<S: AsRef<str>>(value: &Value, id_key: &str, sub_fields: &[S]) -> Option<Value> {
    let mut translated = Map::new();

    for element in value.as_array()? {
        let Some(id) = id_string(element.get(id_key)) else {
            continue;
        };
        let Some(fields) = element.as_object() else {
            continue;
        };

        let entry = copy_non_blank(fields, sub_fields);
        if !entry.is_empty() {
            translated.insert(id, Value::Object(entry));
        }
    }

    (!translated.is_empty()).then_some(Value::Object(translated))
}

/// Copy the listed keys whose values are non-blank strings, in list order
pub fn copy_non_blank<S: AsRef<str>>(source: &Map<String, Value>, keys: &[S]) -> TranslationRecord {
    keys.iter()
        .filter_map(|key| {
            let key = key.as_ref();
            non_blank(source.get(key)).map(|text| (key.to_string(), Value::String(text.to_string())))
        })
        .collect()
}

pub(crate) fn document_name(doc: &Value) -> &str {
    doc.get("name").and_then(Value::as_str).unwrap_or_default()
}
