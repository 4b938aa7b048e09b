//! End-of-run notification

use tracing::info;

/// Receives the single completion message of a run
pub trait CompletionNotifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Notifier writing to the `tracing` log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl CompletionNotifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!(target: "sheet_sync::completion", "{}", message);
    }
}
