//! Compendium source port - Where documents come from

use async_trait::async_trait;

use crate::domain::entities::{Compendium, CompendiumSummary};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Compendium not found: {0}")]
    NotFound(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Malformed compendium {id}: {message}")]
    Malformed { id: String, message: String },
}

/// Read access to the host's compendiums
///
/// `load` is the only suspension point of an export: it materializes every
/// document of the compendium at once.
#[async_trait]
pub trait CompendiumSourcePort: Send + Sync {
    /// List the compendiums available for export
    async fn list(&self) -> Result<Vec<CompendiumSummary>, SourceError>;

    /// Ids of every compendium the source holds, readable or not
    async fn ids(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.list().await?.into_iter().map(|summary| summary.id).collect())
    }

    /// Load a compendium with all its documents and folders
    async fn load(&self, id: &str) -> Result<Compendium, SourceError>;
}
