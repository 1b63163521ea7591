//! Compendium source backed by JSON dumps
//!
//! Each dump is `<root>/<id>.json`:
//!
//! ```json
//! {
//!   "id": "crucible.talent",
//!   "label": "Talents",
//!   "type": "Item",
//!   "folders": [{ "_id": "f1", "name": "Combat", "folder": null }],
//!   "documents": [{ "name": "Cleave", "type": "talent", "system": { ... } }]
//! }
//! ```

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::outbound::{CompendiumSourcePort, SourceError};
use crate::domain::entities::{Compendium, CompendiumSummary, Document, Folder};
use crate::domain::value_objects::DocumentKind;

#[derive(Debug, Deserialize)]
struct CompendiumDump {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(rename = "type")]
    kind: DocumentKind,
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(default)]
    folders: Vec<Folder>,
}

pub struct JsonCompendiumRepository {
    root: PathBuf,
}

impl JsonCompendiumRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, id: &str) -> Option<PathBuf> {
        // Ids name files directly under the root, never a path
        if id.is_empty() || id.contains(['/', '\\']) || id == ".." {
            return None;
        }
        Some(self.root.join(format!("{id}.json")))
    }
}

#[async_trait]
impl CompendiumSourcePort for JsonCompendiumRepository {
    async fn list(&self) -> Result<Vec<CompendiumSummary>, SourceError> {
        let ids = self.ids().await?;

        let mut summaries = Vec::with_capacity(ids.len());
        for id in ids {
            match self.load(&id).await {
                Ok(compendium) => summaries.push(compendium.summary()),
                Err(e) => tracing::warn!("Skipping unreadable compendium dump {}: {}", id, e),
            }
        }

        Ok(summaries)
    }

    /// Every `*.json` file under the root, sorted, without parsing it
    async fn ids(&self) -> Result<Vec<String>, SourceError> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| SourceError::Io(format!("{}: {}", self.root.display(), e)))?;

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| SourceError::Io(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) {
                ids.push(id.to_string());
            }
        }
        ids.sort();

        Ok(ids)
    }

    async fn load(&self, id: &str) -> Result<Compendium, SourceError> {
        let path = self
            .path_for(id)
            .ok_or_else(|| SourceError::NotFound(id.to_string()))?;

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => SourceError::NotFound(id.to_string()),
            _ => SourceError::Io(format!("{}: {}", path.display(), e)),
        })?;

        let dump: CompendiumDump =
            serde_json::from_str(&content).map_err(|e| SourceError::Malformed {
                id: id.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            "Loaded compendium {} ({} documents, {} folders)",
            id,
            dump.documents.len(),
            dump.folders.len()
        );

        let id = dump.id.unwrap_or_else(|| id.to_string());
        Ok(Compendium {
            label: dump.label.unwrap_or_else(|| id.clone()),
            id,
            kind: dump.kind,
            documents: dump.documents,
            folders: dump.folders,
        })
    }
}
