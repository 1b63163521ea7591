//! Application services - The compendium export pipeline
//!
//! Extraction is split the way data flows through an export: the field
//! extractor and tree walker turn documents into translation records, the
//! merge step folds same-named documents together, the folder collector and
//! mapping builder produce the rest of the file, and the export service
//! emits it. The batch service sequences exports over several compendiums.

pub mod batch_service;
pub mod config_detection_service;
pub mod converter_source;
pub mod export_service;
pub mod field_extractor;
pub mod folder_collector;
pub mod mapping_builder;
pub mod merge;
pub mod tree_walker;

pub use batch_service::{BatchExportService, BatchSummary};
pub use config_detection_service::ConfigDetectionService;
pub use export_service::{ExportOptions, ExportService};
