//! Tracing-backed Notifier implementation.
//!
//! Stands in for a desktop notification sink in headless deployments; events
//! surface as structured log lines.

use roster_core::error::Result;
use roster_core::notify::{DirectoryEvent, Notifier};

/// Notifier that writes each event to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, event: &DirectoryEvent) -> Result<()> {
        tracing::info!(title = event.title(), message = %event.message(), "directory event");
        Ok(())
    }
}
