//! Export Service - Builds and emits the Babele file of one compendium

use std::sync::Arc;

use serde_json::Map;

use super::converter_source::{converter_filename, generate_converter_source};
use super::folder_collector::collect_folders;
use super::mapping_builder::build_mapping;
use super::merge::merge_into;
use super::tree_walker::extract_document;
use crate::application::dto::ExportDocument;
use crate::application::ports::outbound::{
    ArtifactSinkPort, CompendiumSourcePort, NotificationPort, SinkError, SourceError,
};
use crate::domain::entities::Compendium;
use crate::domain::value_objects::ExportConfig;

/// Error type for export operations
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No compendium selected")]
    NoSelection,
    #[error("Compendium not found: {0}")]
    MissingReference(String),
    #[error("Compendium is empty: {0}")]
    EmptySource(String),
    #[error("Source error: {0}")]
    Source(SourceError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl From<SourceError> for ExportError {
    fn from(error: SourceError) -> Self {
        match error {
            SourceError::NotFound(id) => Self::MissingReference(id),
            other => Self::Source(other),
        }
    }
}

/// Export behaviour switches
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Emit entries in lexicographic key order
    pub sort_entries: bool,
    /// Also write the companion converter source
    pub emit_converters: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sort_entries: true,
            emit_converters: true,
        }
    }
}

/// What a successful export produced
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub compendium_id: String,
    pub filename: String,
    pub entry_count: usize,
    pub folder_count: usize,
    pub converter_filename: Option<String>,
}

/// Build the export document of a compendium
///
/// Pure: reads only the compendium and the configuration.
pub fn build_export(compendium: &Compendium, config: &ExportConfig, sort_entries: bool) -> ExportDocument {
    let config_key = compendium.config_key();
    let configs = config.configs_for(&config_key);

    let mut entries = Map::new();
    for document in &compendium.documents {
        let record = extract_document(&compendium.kind, document.as_value(), configs, config);
        merge_into(&mut entries, document.name(), record);
    }

    let mut export = ExportDocument {
        label: compendium.label.clone(),
        mapping: build_mapping(&compendium.kind, configs, config),
        folders: collect_folders(&compendium.folders),
        entries,
    };

    if sort_entries {
        export.sort_entries();
    }

    export
}

/// Service running the export pipeline for single compendiums
pub struct ExportService {
    source: Arc<dyn CompendiumSourcePort>,
    sink: Arc<dyn ArtifactSinkPort>,
    notifier: Arc<dyn NotificationPort>,
    config: Arc<ExportConfig>,
    options: ExportOptions,
}

impl ExportService {
    pub fn new(
        source: Arc<dyn CompendiumSourcePort>,
        sink: Arc<dyn ArtifactSinkPort>,
        notifier: Arc<dyn NotificationPort>,
        config: Arc<ExportConfig>,
        options: ExportOptions,
    ) -> Self {
        Self {
            source,
            sink,
            notifier,
            config,
            options,
        }
    }

    pub fn notifier(&self) -> &Arc<dyn NotificationPort> {
        &self.notifier
    }

    /// Export one compendium to `<id>.json`
    ///
    /// An empty compendium is reported as a warning and produces no file.
    /// A converter source that cannot be written is a warning too; other
    /// failures are returned to the caller without notification.
    pub async fn export_compendium(&self, id: &str) -> Result<ExportReport, ExportError> {
        let compendium = self.source.load(id).await?;
        self.notifier.info(&format!("Loading {}...", compendium.label));

        if compendium.documents.is_empty() {
            self.notifier
                .warn(&format!("Compendium {} is empty", compendium.label));
            return Err(ExportError::EmptySource(compendium.id));
        }

        let export = build_export(&compendium, &self.config, self.options.sort_entries);
        let filename = self.emit(&compendium.id, &export).await?;

        let mut report = ExportReport {
            compendium_id: compendium.id.clone(),
            filename,
            entry_count: export.entries.len(),
            folder_count: export.folders.len(),
            converter_filename: None,
        };

        if self.options.emit_converters {
            match self.emit_converters(&compendium).await {
                Ok(filename) => report.converter_filename = filename,
                Err(e) => {
                    // The translation file is already written
                    tracing::warn!("Converter source for {} not written: {}", compendium.id, e);
                    self.notifier.warn(&format!(
                        "Converter source for {} not written: {e}",
                        compendium.label
                    ));
                }
            }
        }

        tracing::debug!(
            "Exported {} ({} entries, {} folders)",
            report.compendium_id,
            report.entry_count,
            report.folder_count
        );

        Ok(report)
    }

    /// Serialize the export and hand it to the sink
    async fn emit(&self, compendium_id: &str, export: &ExportDocument) -> Result<String, ExportError> {
        let content = export.to_json()?;
        let filename = format!("{compendium_id}.json");

        self.sink.write(&filename, &content).await?;
        self.notifier.info(&format!("JSON export succeeded: {filename}"));

        Ok(filename)
    }

    async fn emit_converters(&self, compendium: &Compendium) -> Result<Option<String>, ExportError> {
        let config_key = compendium.config_key();
        let configs = self.config.configs_for(&config_key);

        let Some(source) = generate_converter_source(&config_key, configs) else {
            return Ok(None);
        };

        let filename = converter_filename(&config_key);
        self.sink.write(&filename, &source).await?;
        self.notifier
            .info(&format!("Converter source written: {filename}"));

        Ok(Some(filename))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::domain::entities::{CompendiumSummary, Document, Folder};
    use crate::domain::value_objects::{DocumentKind, FieldConfig};

    pub(crate) struct MockSource {
        compendiums: HashMap<String, Compendium>,
    }

    impl MockSource {
        pub(crate) fn new(compendiums: Vec<Compendium>) -> Self {
            Self {
                compendiums: compendiums.into_iter().map(|c| (c.id.clone(), c)).collect(),
            }
        }
    }

    #[async_trait]
    impl CompendiumSourcePort for MockSource {
        async fn list(&self) -> Result<Vec<CompendiumSummary>, SourceError> {
            Ok(self.compendiums.values().map(Compendium::summary).collect())
        }

        async fn load(&self, id: &str) -> Result<Compendium, SourceError> {
            if id == "broken" {
                return Err(SourceError::Malformed {
                    id: id.to_string(),
                    message: "unexpected end of file".to_string(),
                });
            }
            self.compendiums
                .get(id)
                .cloned()
                .ok_or_else(|| SourceError::NotFound(id.to_string()))
        }
    }

    #[derive(Default)]
    pub(crate) struct MemorySink {
        pub(crate) files: Mutex<Vec<(String, String)>>,
    }

    impl MemorySink {
        pub(crate) fn file(&self, filename: &str) -> Option<String> {
            self.files
                .lock()
                .unwrap()
                .iter()
                .find(|(name, _)| name == filename)
                .map(|(_, content)| content.clone())
        }

        pub(crate) fn count(&self) -> usize {
            self.files.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ArtifactSinkPort for MemorySink {
        async fn write(&self, filename: &str, content: &str) -> Result<(), SinkError> {
            if filename.contains("readonly") {
                return Err(SinkError::Io {
                    filename: filename.to_string(),
                    message: "permission denied".to_string(),
                });
            }
            self.files
                .lock()
                .unwrap()
                .push((filename.to_string(), content.to_string()));
            Ok(())
        }
    }

    #[derive(Default)]
    pub(crate) struct RecordingNotifier {
        pub(crate) messages: Mutex<Vec<(&'static str, String)>>,
    }

    impl RecordingNotifier {
        pub(crate) fn of_level(&self, level: &str) -> Vec<String> {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, m)| m.clone())
                .collect()
        }
    }

    impl NotificationPort for RecordingNotifier {
        fn info(&self, message: &str) {
            self.messages.lock().unwrap().push(("info", message.to_string()));
        }

        fn warn(&self, message: &str) {
            self.messages.lock().unwrap().push(("warn", message.to_string()));
        }

        fn error(&self, message: &str) {
            self.messages.lock().unwrap().push(("error", message.to_string()));
        }
    }

    pub(crate) fn npc_pack() -> Compendium {
        Compendium::new("npc-pack", "npc-pack", DocumentKind::Actor).with_document(Document::new(json!({
            "name": "Guard",
            "system": { "description": "A guard." },
            "items": [{ "name": "Sword", "system": { "description": "" } }]
        })))
    }

    fn create_service(
        compendiums: Vec<Compendium>,
        options: ExportOptions,
    ) -> (ExportService, Arc<MemorySink>, Arc<RecordingNotifier>) {
        let sink = Arc::new(MemorySink::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let service = ExportService::new(
            Arc::new(MockSource::new(compendiums)),
            sink.clone(),
            notifier.clone(),
            Arc::new(ExportConfig::default()),
            options,
        );
        (service, sink, notifier)
    }

    #[tokio::test]
    async fn test_end_to_end_actor_export() {
        let (service, sink, notifier) = create_service(vec![npc_pack()], ExportOptions::default());

        let report = service
            .export_compendium("npc-pack")
            .await
            .expect("export should succeed");

        assert_eq!(report.filename, "npc-pack.json");
        assert_eq!(report.entry_count, 1);

        let content = sink.file("npc-pack.json").expect("file should be written");
        let written: Value = serde_json::from_str(&content).expect("valid JSON");
        assert_eq!(written["label"], json!("npc-pack"));
        assert_eq!(
            written["mapping"]["items"],
            json!({ "path": "items", "converter": "adventure_items_converter" })
        );
        assert_eq!(written["folders"], json!({}));
        assert_eq!(
            written["entries"],
            json!({
                "Guard": {
                    "name": "Guard",
                    "description": "A guard.",
                    "items": { "Sword": { "name": "Sword" } }
                }
            })
        );
        assert!(content.contains("\n  \"label\": \"npc-pack\""));

        assert_eq!(report.converter_filename.as_deref(), Some("converter-Actor.txt"));
        assert!(notifier
            .of_level("info")
            .iter()
            .any(|m| m == "JSON export succeeded: npc-pack.json"));
    }

    #[test]
    fn test_same_named_documents_merge() {
        let pack = Compendium::new("bandits", "Bandits", DocumentKind::Actor)
            .with_document(Document::new(json!({ "name": "Bandit", "system": { "description": "Lvl 1" } })))
            .with_document(Document::new(json!({ "name": "Bandit", "items": [{ "name": "Bow" }] })));

        let export = build_export(&pack, &ExportConfig::default(), true);

        assert_eq!(export.entries.len(), 1);
        assert_eq!(
            export.entries["Bandit"],
            json!({ "name": "Bandit", "description": "Lvl 1", "items": { "Bow": { "name": "Bow" } } })
        );
    }

    #[test]
    fn test_entries_sorted_when_requested() {
        let pack = Compendium::new("crucible.spell", "Spells", DocumentKind::Item)
            .with_document(Document::new(json!({ "name": "Zap", "type": "spell" })))
            .with_document(Document::new(json!({ "name": "Aura", "type": "spell" })))
            .with_folder(Folder::new("f1", "Arcane"));

        let sorted = build_export(&pack, &ExportConfig::default(), true);
        let unsorted = build_export(&pack, &ExportConfig::default(), false);

        assert_eq!(sorted.entries.keys().collect::<Vec<_>>(), vec!["Aura", "Zap"]);
        assert_eq!(unsorted.entries.keys().collect::<Vec<_>>(), vec!["Zap", "Aura"]);
        assert_eq!(sorted.folders, unsorted.folders);
        assert!(sorted.folders.contains_key("Arcane"));
    }

    #[tokio::test]
    async fn test_empty_compendium_warns_and_writes_nothing() {
        let empty = Compendium::new("empty", "Empty Pack", DocumentKind::Item);
        let (service, sink, notifier) = create_service(vec![empty], ExportOptions::default());

        let result = service.export_compendium("empty").await;

        assert!(matches!(result, Err(ExportError::EmptySource(id)) if id == "empty"));
        assert_eq!(sink.count(), 0);
        assert_eq!(notifier.of_level("warn"), vec!["Compendium Empty Pack is empty"]);
    }

    #[tokio::test]
    async fn test_missing_compendium() {
        let (service, sink, _) = create_service(vec![], ExportOptions::default());

        let result = service.export_compendium("nowhere").await;

        assert!(matches!(result, Err(ExportError::MissingReference(id)) if id == "nowhere"));
        assert_eq!(sink.count(), 0);
    }

    #[tokio::test]
    async fn test_converters_skipped_when_disabled() {
        let options = ExportOptions {
            sort_entries: true,
            emit_converters: false,
        };
        let (service, sink, _) = create_service(vec![npc_pack()], options);

        let report = service
            .export_compendium("npc-pack")
            .await
            .expect("export should succeed");

        assert!(report.converter_filename.is_none());
        assert_eq!(sink.count(), 1);
    }

    #[tokio::test]
    async fn test_item_pack_without_converters_writes_json_only() {
        let pack = Compendium::new("crucible.weapon", "Weapons", DocumentKind::Item)
            .with_document(Document::new(json!({ "name": "Axe", "type": "weapon" })));
        let (service, sink, _) = create_service(vec![pack], ExportOptions::default());

        let report = service
            .export_compendium("crucible.weapon")
            .await
            .expect("export should succeed");

        assert!(report.converter_filename.is_none());
        assert_eq!(sink.count(), 1);
    }

    #[tokio::test]
    async fn test_sink_failure_propagates() {
        let pack = Compendium::new("readonly.pack", "Locked", DocumentKind::Item)
            .with_document(Document::new(json!({ "name": "Axe", "type": "weapon" })));
        let (service, _, _) = create_service(vec![pack], ExportOptions::default());

        let result = service.export_compendium("readonly.pack").await;

        assert!(matches!(result, Err(ExportError::Sink(_))));
    }

    #[tokio::test]
    async fn test_converter_write_failure_keeps_export() {
        let pack = Compendium::new("crucible.relic", "Relics", DocumentKind::Item)
            .with_document(Document::new(json!({ "name": "Crown", "type": "readonly" })));
        let config = ExportConfig::default().with_type(
            "readonly",
            vec![FieldConfig::new("properties", "system.properties", "properties_converter")],
        );
        let sink = Arc::new(MemorySink::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let service = ExportService::new(
            Arc::new(MockSource::new(vec![pack])),
            sink.clone(),
            notifier.clone(),
            Arc::new(config),
            ExportOptions::default(),
        );

        let report = service
            .export_compendium("crucible.relic")
            .await
            .expect("export should succeed");

        assert_eq!(report.filename, "crucible.relic.json");
        assert!(report.converter_filename.is_none());
        assert!(sink.file("crucible.relic.json").is_some());
        assert_eq!(sink.count(), 1);
        let warnings = notifier.of_level("warn");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Converter source for Relics not written"));
    }
}
