//! Application configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::application::services::batch_service::DEFAULT_BATCH_DELAY;
use crate::application::services::ExportOptions;
use crate::domain::value_objects::ExportConfig;

/// Configuration file looked up in the working directory (any format the
/// `config` crate understands: `babele-exporter.toml`, `.json`, `.yaml`...)
const CONFIG_FILE: &str = "babele-exporter";

/// Prefix of the environment variables overriding the file
const ENV_PREFIX: &str = "BABELE";

/// Application configuration loaded from file and environment
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory holding the compendium dumps (`<id>.json`)
    pub source_dir: PathBuf,
    /// Directory receiving the translation files
    pub output_dir: PathBuf,
    /// Pause between two compendiums of a batch, in milliseconds
    pub batch_delay_ms: u64,
    /// Emit entries in lexicographic order
    pub sort_entries: bool,
    /// Write the companion converter source next to the translation file
    pub emit_converters: bool,
    /// Optional JSON file replacing the built-in export configuration
    #[serde(default)]
    pub export_config_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration: defaults, then the optional file, then `BABELE_*`
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(file: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("source_dir", "packs")?
            .set_default("output_dir", "translations")?
            .set_default("batch_delay_ms", DEFAULT_BATCH_DELAY.as_millis() as i64)?
            .set_default("sort_entries", true)?
            .set_default("emit_converters", true)?
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to build configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration values")
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            sort_entries: self.sort_entries,
            emit_converters: self.emit_converters,
        }
    }

    /// The export configuration: the configured file, or the built-in defaults
    pub async fn export_config(&self) -> Result<ExportConfig> {
        match &self.export_config_path {
            Some(path) => load_export_config(path).await,
            None => Ok(ExportConfig::default()),
        }
    }
}

async fn load_export_config(path: &Path) -> Result<ExportConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read export configuration {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Invalid export configuration {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::load_from("does-not-exist/babele-exporter")
            .expect("defaults should load");

        assert_eq!(config.batch_delay(), Duration::from_millis(100));
        assert!(config.export_options().sort_entries);
        assert!(config.export_config_path.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("exporter.toml");
        std::fs::write(
            &path,
            "source_dir = \"dumps\"\nbatch_delay_ms = 5\nemit_converters = false\n",
        )
        .expect("write config");

        let config = AppConfig::load_from(path.to_str().expect("utf-8 path"))
            .expect("config should load");

        assert_eq!(config.source_dir, PathBuf::from("dumps"));
        assert_eq!(config.output_dir, PathBuf::from("translations"));
        assert_eq!(config.batch_delay_ms, 5);
        assert!(!config.emit_converters);
    }

    #[tokio::test]
    async fn test_export_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"weapon": [{{"field": "properties", "path": "system.properties", "converter": "properties_converter", "subFields": ["label"]}}], "default": []}}"#
        )
        .expect("write export config");

        let config = load_export_config(file.path()).await.expect("config should load");

        assert_eq!(config.configs_for("weapon")[0].field, "properties");
        assert!(config.configs_for("talent").is_empty());
    }

    #[tokio::test]
    async fn test_export_config_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write export config");

        assert!(load_export_config(file.path()).await.is_err());
    }
}
