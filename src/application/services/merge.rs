//! Merging translation records of same-named documents
//!
//! A compendium may hold several documents sharing a display name (leveled
//! variants of one NPC, for instance). Their translatable fields are unioned
//! instead of the last one replacing the others. When both sides carry a
//! scalar or an array for the same field the incoming value wins.

use serde_json::{Map, Value};

use crate::domain::value_objects::TranslationRecord;

/// Insert `record` under `key`, deep-merging into any existing record
pub fn merge_into(target: &mut Map<String, Value>, key: &str, record: TranslationRecord) {
    match target.get_mut(key) {
        Some(Value::Object(existing)) => deep_merge(existing, record),
        _ => {
            target.insert(key.to_string(), Value::Object(record));
        }
    }
}

fn deep_merge(existing: &mut Map<String, Value>, incoming: Map<String, Value>) {
    for (field, value) in incoming {
        match (existing.get_mut(&field), value) {
            (Some(Value::Object(current)), Value::Object(next)) => deep_merge(current, next),
            (_, value) => {
                existing.insert(field, value);
            }
        }
    }
}
