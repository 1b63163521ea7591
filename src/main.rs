//! Babele Exporter - Translation file exporter for Foundry VTT compendiums
//!
//! The exporter reads compendium dumps and produces, per compendium:
//! - a Babele translation file (`<id>.json`) with label, mapping, folders
//!   and entries
//! - the converter registration source the mapping refers to
//!
//! It can also inspect a compendium and suggest an export configuration
//! for it.

mod application;
mod domain;
mod infrastructure;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::application::ports::outbound::{ArtifactSinkPort, CompendiumSourcePort};
use crate::application::services::{
    BatchExportService, BatchSummary, ConfigDetectionService, ExportService,
};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::export::FileArtifactSink;
use crate::infrastructure::notifications::TracingNotifier;
use crate::infrastructure::persistence::JsonCompendiumRepository;

#[derive(Parser, Debug)]
#[command(name = "babele-exporter")]
#[command(about = "Export Foundry VTT compendiums as Babele translation files")]
struct Args {
    /// Directory holding the compendium dumps (overrides configuration)
    #[arg(short, long, global = true)]
    source_dir: Option<PathBuf>,

    /// Directory receiving the generated files (overrides configuration)
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available compendiums
    List,
    /// Export one or more compendiums
    Export {
        /// Compendium ids, in export order
        ids: Vec<String>,
        /// Export every available compendium
        #[arg(long, conflicts_with = "ids")]
        all: bool,
    },
    /// Analyze a compendium and suggest its export configuration
    Detect {
        /// Compendium id
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "babele_exporter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = AppConfig::load()?;
    if let Some(dir) = args.source_dir {
        config.source_dir = dir;
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    tracing::debug!("Configuration loaded");
    tracing::debug!("  Source: {}", config.source_dir.display());
    tracing::debug!("  Output: {}", config.output_dir.display());

    let source: Arc<dyn CompendiumSourcePort> =
        Arc::new(JsonCompendiumRepository::new(&config.source_dir));
    let sink: Arc<dyn ArtifactSinkPort> = Arc::new(FileArtifactSink::new(&config.output_dir));

    match args.command {
        Command::List => list(source.as_ref()).await,
        Command::Export { ids, all } => {
            let summary = export(&config, source, sink, ids, all).await?;
            if summary.failed > 0 || summary.total() == 0 {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Command::Detect { id } => detect(source.as_ref(), sink.as_ref(), &id).await,
    }
}

async fn list(source: &dyn CompendiumSourcePort) -> anyhow::Result<ExitCode> {
    let summaries = source
        .list()
        .await
        .context("Failed to list compendiums")?;

    for summary in &summaries {
        println!(
            "{}\t{}\t{}\t{} document(s)",
            summary.id, summary.kind, summary.label, summary.document_count
        );
    }

    Ok(ExitCode::SUCCESS)
}

async fn export(
    config: &AppConfig,
    source: Arc<dyn CompendiumSourcePort>,
    sink: Arc<dyn ArtifactSinkPort>,
    ids: Vec<String>,
    all: bool,
) -> anyhow::Result<BatchSummary> {
    // Unreadable dumps stay in the selection so the batch records them as failed
    let ids = if all {
        source.ids().await.context("Failed to list compendiums")?
    } else {
        ids
    };

    let export_config = Arc::new(config.export_config().await?);
    let exporter = ExportService::new(
        source,
        sink,
        Arc::new(TracingNotifier),
        export_config,
        config.export_options(),
    );
    let batch = BatchExportService::new(Arc::new(exporter), config.batch_delay());

    Ok(batch.run(&ids).await)
}

async fn detect(
    source: &dyn CompendiumSourcePort,
    sink: &dyn ArtifactSinkPort,
    id: &str,
) -> anyhow::Result<ExitCode> {
    let compendium = source
        .load(id)
        .await
        .with_context(|| format!("Failed to load compendium {id}"))?;

    let detector = ConfigDetectionService::new();
    let analysis = detector.analyze(&compendium);
    print!("{}", analysis.report());

    let config_key = compendium.config_key();
    let configs = detector.suggest_configs(&analysis);
    if configs.is_empty() {
        tracing::info!("No array field to configure for {}", config_key);
        return Ok(ExitCode::SUCCESS);
    }

    let rendered = detector.render_config(&config_key, &configs)?;
    let filename = format!("config-{config_key}.json");
    sink.write(&filename, &rendered).await?;
    tracing::info!("Suggested configuration written: {}", filename);

    Ok(ExitCode::SUCCESS)
}
