//! Bounded progress channel between the background batch and its presenter.

use tokio::sync::mpsc;

use crate::config::PipelineConfig;
use crate::types::ConversionProgress;

/// Create a bounded progress channel with the configured buffer size.
///
/// When the buffer is full the batch waits for the presenter to catch up.
pub fn progress_channel(
    config: &PipelineConfig,
) -> (
    mpsc::Sender<ConversionProgress>,
    mpsc::Receiver<ConversionProgress>,
) {
    mpsc::channel(config.progress_buffer.max(1))
}

/// Owns the global step counter and publishes one event per finished unit.
pub struct ProgressReporter {
    tx: mpsc::Sender<ConversionProgress>,
    completed: u64,
    total: u64,
}

impl ProgressReporter {
    pub fn new(tx: mpsc::Sender<ConversionProgress>, total: u64) -> Self {
        Self {
            tx,
            completed: 0,
            total,
        }
    }

    /// Count one finished (file, variant) unit and publish it.
    ///
    /// A presenter that stopped listening does not stop the batch.
    pub async fn step(&mut self, file_name: &str, variant: &str) -> ConversionProgress {
        self.completed += 1;
        let event = ConversionProgress {
            completed_steps: self.completed,
            total_steps: self.total,
            current_file_name: file_name.to_string(),
            current_variant: variant.to_string(),
        };
        if self.tx.send(event.clone()).await.is_err() {
            tracing::trace!("Progress receiver dropped; continuing without updates");
        }
        event
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }
}
