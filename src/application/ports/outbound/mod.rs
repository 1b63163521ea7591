//! Outbound ports - Interfaces that the application requires from external systems

mod artifact_sink_port;
mod compendium_source_port;
mod notification_port;

pub use artifact_sink_port::{ArtifactSinkPort, SinkError};
pub use compendium_source_port::{CompendiumSourcePort, SourceError};
pub use notification_port::NotificationPort;
