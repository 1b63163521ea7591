//! Batch Export Service - Sequential export over a selection of compendiums
//!
//! Compendiums are processed strictly one at a time with a short pause
//! between them. A failing compendium is recorded and the batch moves on;
//! nothing escapes this boundary except the summary.

use std::sync::Arc;
use std::time::Duration;

use super::export_service::{ExportError, ExportService};

/// Pause between two compendiums of a batch
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(100);

/// A compendium that could not be exported
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    pub compendium_id: String,
    pub reason: String,
}

/// Outcome counts of a batch run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub succeeded: usize,
    /// Empty compendiums, warned about but not written
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<BatchFailure>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }
}

pub struct BatchExportService {
    exporter: Arc<ExportService>,
    delay: Duration,
}

impl BatchExportService {
    pub fn new(exporter: Arc<ExportService>, delay: Duration) -> Self {
        Self { exporter, delay }
    }

    /// Export every compendium of `ids` in order
    pub async fn run(&self, ids: &[String]) -> BatchSummary {
        let notifier = self.exporter.notifier();
        let mut summary = BatchSummary::default();

        if ids.is_empty() {
            notifier.error(&ExportError::NoSelection.to_string());
            return summary;
        }

        notifier.info(&format!("Exporting {} compendium(s)...", ids.len()));

        for (index, id) in ids.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            match self.exporter.export_compendium(id).await {
                Ok(report) => {
                    tracing::info!("Exported {} to {}", id, report.filename);
                    summary.succeeded += 1;
                }
                Err(ExportError::EmptySource(_)) => {
                    summary.skipped += 1;
                }
                Err(e) => {
                    tracing::error!("Failed to export {}: {}", id, e);
                    notifier.error(&format!("Export of {id} failed: {e}"));
                    summary.failed += 1;
                    summary.failures.push(BatchFailure {
                        compendium_id: id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        notifier.info(&format!(
            "Batch export finished: {}/{} succeeded",
            summary.succeeded,
            summary.total()
        ));

        summary
    }
}
