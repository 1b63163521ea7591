//! Translation artifact output
//!
//! Exported Babele files and converter sources are written to a directory
//! through [`FileArtifactSink`].

mod file_artifact_sink;

pub use file_artifact_sink::FileArtifactSink;
