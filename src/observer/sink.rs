use std::fmt::Display;
use std::time::Duration;
use tracing::{debug, error, info};

/// Receives progress notifications from the retry executor and orchestrator.
///
/// Every method has an empty default so implementors only override the events
/// they care about. None of these calls affect execution.
pub trait ProgressObserver: Send + Sync {
    /// A task failed and will be invoked again after `delay`.
    ///
    /// `attempt` counts failures so far (1 for the first failure).
    fn retry_scheduled(&self, _task: usize, _attempt: u32, _max_attempts: u32, _delay: Duration) {}

    /// A task failed on its last permitted attempt.
    fn attempts_exhausted(&self, _task: usize, _max_attempts: u32, _error: &dyn Display) {}

    /// Every task in batch `batch` (1-based) has settled.
    fn batch_settled(&self, _batch: usize, _total_batches: usize, _failed: usize) {}

    /// The orchestrator is pausing before the next batch.
    fn inter_batch_pause(&self, _delay: Duration) {}

    /// The run was cancelled; `skipped` tasks were never invoked.
    fn run_cancelled(&self, _skipped: usize) {}
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

/// Logs notifications through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ProgressObserver for TracingObserver {
    fn retry_scheduled(&self, task: usize, attempt: u32, max_attempts: u32, delay: Duration) {
        info!(
            task,
            "Retrying in {} ms... ({}/{})",
            delay.as_millis(),
            attempt,
            max_attempts
        );
    }

    fn attempts_exhausted(&self, task: usize, max_attempts: u32, error: &dyn Display) {
        error!(task, "All {} attempts failed: {}", max_attempts, error);
    }

    fn batch_settled(&self, batch: usize, total_batches: usize, failed: usize) {
        info!(failed, "Processed batch {} of {}", batch, total_batches);
    }

    fn inter_batch_pause(&self, delay: Duration) {
        debug!(
            "Waiting for {} milliseconds before processing the next batch...",
            delay.as_millis()
        );
    }

    fn run_cancelled(&self, skipped: usize) {
        info!(skipped, "Run cancelled, remaining tasks were not started");
    }
}
