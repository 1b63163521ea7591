//! Artifact sink port - Where exported files go

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("I/O error writing {filename}: {message}")]
    Io { filename: String, message: String },
}

#[async_trait]
pub trait ArtifactSinkPort: Send + Sync {
    /// Save `content` under `filename`, replacing any previous artifact
    async fn write(&self, filename: &str, content: &str) -> Result<(), SinkError>;
}
