//! Compendium entity - A named, typed collection of documents

use serde::{Deserialize, Serialize};

use super::{Document, Folder};
use crate::domain::value_objects::DocumentKind;

/// A compendium with its documents already materialized
#[derive(Debug, Clone)]
pub struct Compendium {
    pub id: String,
    pub label: String,
    pub kind: DocumentKind,
    pub documents: Vec<Document>,
    pub folders: Vec<Folder>,
}

impl Compendium {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            documents: Vec::new(),
            folders: Vec::new(),
        }
    }

    pub fn with_document(mut self, document: Document) -> Self {
        self.documents.push(document);
        self
    }

    pub fn with_folder(mut self, folder: Folder) -> Self {
        self.folders.push(folder);
        self
    }

    /// Key used to look up the export configuration
    ///
    /// Item compendiums are keyed by the sub-type of their first document
    /// (`talent`, `spell`...), everything else by the declared type.
    pub fn config_key(&self) -> String {
        match &self.kind {
            DocumentKind::Item => self
                .documents
                .first()
                .and_then(Document::sub_type)
                .unwrap_or("Item")
                .to_string(),
            kind => kind.as_str().to_string(),
        }
    }

    pub fn summary(&self) -> CompendiumSummary {
        CompendiumSummary {
            id: self.id.clone(),
            label: self.label.clone(),
            kind: self.kind.clone(),
            document_count: self.documents.len(),
        }
    }
}

/// Lightweight listing entry for a compendium
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompendiumSummary {
    pub id: String,
    pub label: String,
    pub kind: DocumentKind,
    pub document_count: usize,
}
