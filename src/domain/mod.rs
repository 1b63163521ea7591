//! Domain layer - Compendium data with no external dependencies
//!
//! This layer contains:
//! - Entities: Document, Compendium, Folder
//! - Value Objects: DocumentKind, FieldConfig, ExportConfig, translation helpers

pub mod entities;
pub mod value_objects;
