//! Mapping construction - The `mapping` block of a Babele translation file

use crate::application::dto::{MappingEntry, MappingTable};
use crate::domain::value_objects::{DocumentKind, ExportConfig, FieldConfig};

pub const DESCRIPTION_PATH: &str = "system.description";
pub const ACTOR_ITEMS_PATH: &str = "items";
pub const ACTOR_ITEMS_CONVERTER: &str = "adventure_items_converter";

/// Sub-collections of an adventure translated through converters
const ADVENTURE_COLLECTIONS: [&str; 4] = ["items", "journals", "scenes", "macros"];

/// Build the mapping for a compendium of `kind`
///
/// Structural configurations (actor items, item actions) are never listed:
/// the walker handles them, not a declared converter.
pub fn build_mapping(kind: &DocumentKind, configs: &[FieldConfig], export_config: &ExportConfig) -> MappingTable {
    let mut mapping = MappingTable::new();

    match kind {
        DocumentKind::Adventure => {
            for collection in ADVENTURE_COLLECTIONS {
                mapping.insert(collection, MappingEntry::Table(MappingTable::new()));
            }

            let mut actors = MappingTable::new();
            for config in export_config
                .actor_configs()
                .iter()
                .filter(|config| !config.is_structural() && config.has_converter())
            {
                actors.insert(
                    config.field.clone(),
                    MappingEntry::converter(config.path.clone(), config.converter.clone()),
                );
            }
            mapping.insert("actors", MappingEntry::Table(actors));
        }
        DocumentKind::Actor => {
            let items = configs.iter().find(|config| config.is_actor_item);
            let path = items.map_or(ACTOR_ITEMS_PATH, |config| config.path.as_str());
            let converter = items
                .filter(|config| config.has_converter())
                .map_or(ACTOR_ITEMS_CONVERTER, |config| config.converter.as_str());

            mapping.insert("items", MappingEntry::converter(path, converter));
            mapping.insert("description", MappingEntry::path(DESCRIPTION_PATH));
        }
        DocumentKind::JournalEntry => {}
        DocumentKind::Item | DocumentKind::Other(_) => {
            mapping.insert("description", MappingEntry::path(DESCRIPTION_PATH));
        }
    }

    for config in configs.iter().filter(|config| !config.is_structural()) {
        mapping.insert(config.field.clone(), entry_for(config));
    }

    mapping
}

fn entry_for(config: &FieldConfig) -> MappingEntry {
    if config.has_converter() {
        MappingEntry::converter(config.path.clone(), config.converter.clone())
    } else {
        MappingEntry::path(config.path.clone())
    }
}
