//! Tree walking - Translation records for composite documents
//!
//! Actors own items, journals own pages, and adventures own whole sets of
//! actors, journals, scenes, macros and folders. The walker descends into
//! those collections and assembles name-keyed sub-records, reusing the field
//! extractor for every item-like leaf.

use serde_json::{Map, Value};

use super::field_extractor::{apply_configured_fields, document_name, extract_item_translation};
use super::merge::merge_into;
use crate::domain::entities::get_property;
use crate::domain::value_objects::{
    non_blank, DocumentKind, ExportConfig, FieldConfig, TranslationRecord,
};

const DEFAULT_ITEMS_PATH: &str = "items";
const PAGE_TEXT_PATH: &str = "text.content";

/// Extract the translation record of a top-level compendium document
///
/// `configs` are the field configurations selected for the compendium;
/// `export_config` is consulted for the actors nested in adventures.
pub fn extract_document(
    kind: &DocumentKind,
    doc: &Value,
    configs: &[FieldConfig],
    export_config: &ExportConfig,
) -> TranslationRecord {
    match kind {
        DocumentKind::Item | DocumentKind::Other(_) => {
            let mut record = extract_item_translation(doc);
            apply_configured_fields(doc, configs, &mut record);
            record
        }
        DocumentKind::Actor => extract_actor(doc, configs),
        DocumentKind::JournalEntry => extract_journal(doc, configs),
        DocumentKind::Adventure => extract_adventure(doc, configs, export_config.actor_configs()),
    }
}

/// `{name, description?, <configured fields>?, items?}` for an actor
pub fn extract_actor(doc: &Value, configs: &[FieldConfig]) -> TranslationRecord {
    let mut record = extract_item_translation(doc);
    apply_configured_fields(doc, configs, &mut record);

    let items_path = configs
        .iter()
        .find(|config| config.is_actor_item)
        .map(|config| config.path.as_str())
        .unwrap_or(DEFAULT_ITEMS_PATH);

    if let Some(items) = name_keyed(get_property(doc, items_path), extract_item_translation) {
        record.insert("items".to_string(), items);
    }

    record
}

/// `{name, pages?, <configured fields>?}` for a journal entry
pub fn extract_journal(doc: &Value, configs: &[FieldConfig]) -> TranslationRecord {
    let mut record = named_record(doc);

    if let Some(pages) = extract_pages(doc.get("pages")) {
        record.insert("pages".to_string(), pages);
    }

    apply_configured_fields(doc, configs, &mut record);
    record
}

/// The full adventure record
///
/// Actors sharing a name inside one adventure are merged rather than
/// overwritten.
pub fn extract_adventure(
    doc: &Value,
    configs: &[FieldConfig],
    actor_configs: &[FieldConfig],
) -> TranslationRecord {
    let mut record = named_record(doc);

    for field in ["caption", "description"] {
        if let Some(text) = non_blank(doc.get(field)) {
            record.insert(field.to_string(), Value::String(text.to_string()));
        }
    }

    let sections = [
        ("scenes", name_keyed(doc.get("scenes"), |scene| named_record(scene))),
        (
            "macros",
            name_keyed(doc.get("macros"), |entry| {
                let mut macro_record = named_record(entry);
                if let Some(source) = non_blank(entry.get("command")) {
                    macro_record.insert("command".to_string(), Value::String(source.to_string()));
                }
                macro_record
            }),
        ),
        ("folders", name_keyed(doc.get("folders"), |folder| named_record(folder))),
        (
            "journals",
            name_keyed(doc.get("journal"), |journal| {
                let mut journal_record = named_record(journal);
                if let Some(pages) = extract_pages(journal.get("pages")) {
                    journal_record.insert("pages".to_string(), pages);
                }
                journal_record
            }),
        ),
        (
            "actors",
            name_keyed(doc.get("actors"), |actor| extract_actor(actor, actor_configs)),
        ),
        (
            "items",
            name_keyed(doc.get("items"), |item| extract_item_translation(item)),
        ),
    ];

    for (key, section) in sections {
        if let Some(section) = section {
            record.insert(key.to_string(), section);
        }
    }

    apply_configured_fields(doc, configs, &mut record);
    record
}

/// Journal pages keyed by name: `{name, text?}`
fn extract_pages(value: Option<&Value>) -> Option<Value> {
    name_keyed(value, |page| {
        let mut record = named_record(page);
        if let Some(text) = non_blank(get_property(page, PAGE_TEXT_PATH)) {
            record.insert("text".to_string(), Value::String(text.to_string()));
        }
        record
    })
}

/// Build a name-keyed table from an array of records
///
/// Elements without a visible name are skipped; same-named elements merge.
/// Returns `None` when the value is not an array or nothing survived.
fn name_keyed<F>(value: Option<&Value>, mut extract: F) -> Option<Value>
where
    F: FnMut(&Value) -> TranslationRecord,
{
    let mut table = Map::new();

    for element in value?.as_array()? {
        let Some(name) = non_blank(element.get("name")) else {
            continue;
        };
        merge_into(&mut table, name, extract(element));
    }

    (!table.is_empty()).then_some(Value::Object(table))
}

fn named_record(doc: &Value) -> TranslationRecord {
    let mut record = TranslationRecord::new();
    record.insert("name".to_string(), Value::String(document_name(doc).to_string()));
    record
}
