//! Value objects - Immutable objects defined by their attributes

mod document_kind;
mod field_config;
mod translation;

pub use document_kind::DocumentKind;
pub use field_config::{ExportConfig, FieldConfig, DEFAULT_ID_KEY};
pub use translation::{id_string, non_blank, TranslationRecord};
