//! User-facing notifications routed through tracing

use crate::application::ports::outbound::NotificationPort;

/// Emits notifications as log events under the `babele_exporter::notify` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationPort for TracingNotifier {
    fn info(&self, message: &str) {
        tracing::info!(target: "babele_exporter::notify", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "babele_exporter::notify", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "babele_exporter::notify", "{}", message);
    }
}
