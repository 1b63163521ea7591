//! Data Transfer Objects - The shape of the exported translation file
//!
//! DTOs live in the application layer so the artifact sink can serialize
//! them without pulling output formatting into the domain model.

pub mod export_document;
pub mod mapping;

pub use export_document::ExportDocument;
pub use mapping::{MappingEntry, MappingTable};
