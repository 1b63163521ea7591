//! Exported translation file

use serde::Serialize;
use serde_json::{Map, Value};

use super::MappingTable;

/// The Babele translation file for one compendium
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub label: String,
    pub mapping: MappingTable,
    /// Folder names, each mapped to itself
    pub folders: Map<String, Value>,
    /// Translation records keyed by document name
    pub entries: Map<String, Value>,
}

impl ExportDocument {
    /// Re-key entries in lexicographic order so successive exports diff cleanly
    pub fn sort_entries(&mut self) {
        let mut entries: Vec<(String, Value)> = std::mem::take(&mut self.entries).into_iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        self.entries = entries.into_iter().collect();
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
