//! Filesystem artifact sink

use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::ports::outbound::{ArtifactSinkPort, SinkError};

/// Writes artifacts as files under an output directory, creating it on demand
pub struct FileArtifactSink {
    output_dir: PathBuf,
}

impl FileArtifactSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl ArtifactSinkPort for FileArtifactSink {
    async fn write(&self, filename: &str, content: &str) -> Result<(), SinkError> {
        let io_error = |e: std::io::Error| SinkError::Io {
            filename: filename.to_string(),
            message: e.to_string(),
        };

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(io_error)?;

        let path = self.output_dir.join(filename);
        tokio::fs::write(&path, content).await.map_err(io_error)?;

        tracing::debug!("Wrote {} ({} bytes)", path.display(), content.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_directory_and_replaces() {
        let dir = tempfile::tempdir().expect("temp dir");
        let output = dir.path().join("translations").join("fr");
        let sink = FileArtifactSink::new(&output);

        sink.write("npc-pack.json", "{}").await.expect("first write");
        sink.write("npc-pack.json", "{\"label\": \"PNJ\"}")
            .await
            .expect("second write");

        let content = std::fs::read_to_string(output.join("npc-pack.json")).expect("read back");
        assert_eq!(content, "{\"label\": \"PNJ\"}");
    }

    #[tokio::test]
    async fn test_write_failure_names_the_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let blocker = dir.path().join("occupied");
        std::fs::write(&blocker, "a file, not a directory").expect("write blocker");
        let sink = FileArtifactSink::new(&blocker);

        let error = sink
            .write("npc-pack.json", "{}")
            .await
            .expect_err("output dir is a file");

        assert!(error.to_string().contains("npc-pack.json"));
    }
}
