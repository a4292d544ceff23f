//! Batch Orchestrator Module
//!
//! This module runs a set of independent tasks in fixed-size batches,
//! retrying each failing task on its own and collecting one outcome per task.
//!
//! # Execution Flow
//! 1. Validate the configuration and partition the tasks
//! 2. Run every task of the current batch concurrently through `RetryExecutor`
//! 3. Wait for the whole batch to settle (bounds in-flight work to `batch_size`)
//! 4. Append the batch's outcomes in task order
//! 5. Pause for `inter_batch_delay` if more batches remain
//! 6. Return all outcomes, indexed like the input

use crate::{
    batch::partition,
    cancel::{CancelToken, wait_cancelled},
    config::ExecutorConfig,
    observer::{ProgressObserver, TracingObserver},
    retry::RetryExecutor,
    BatchError, Outcome, TaskError,
};
use futures::future::join_all;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info};

/// Batch orchestrator
///
/// Drives batches strictly one after another. A task that still fails after
/// its retries occupies its slot in the result as a `TaskError`; it never
/// aborts its batch or the run.
pub struct BatchOrchestrator {
    /// Batch size, inter-batch delay and retry settings
    config: ExecutorConfig,
    /// Receives retry and batch progress notifications
    observer: Arc<dyn ProgressObserver>,
    /// Optional signal that short-circuits the remaining work
    cancel: Option<CancelToken>,
}

impl BatchOrchestrator {
    /// Creates a new batch orchestrator that reports progress through `tracing`
    pub fn new(config: ExecutorConfig) -> Self {
        Self {
            config,
            observer: Arc::new(TracingObserver),
            cancel: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Run every task and collect its outcome
    ///
    /// Tasks are re-invocable thunks; each call starts a fresh attempt.
    ///
    /// # Returns
    /// * `Ok(outcomes)` with `outcomes[i]` belonging to `tasks[i]`
    /// * `Err(BatchError)` if the configuration is invalid, before any task runs
    ///
    /// # Cancellation
    /// Once the cancel token fires, pending and in-flight tasks resolve to
    /// `TaskError::Cancelled` and later batches are never started, so the
    /// result still holds one outcome per task.
    pub async fn run<F, Fut, R, E>(&self, tasks: Vec<F>) -> Result<Vec<Outcome<R, E>>, BatchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: Display,
    {
        self.config.validate()?;

        let total_tasks = tasks.len();
        let batches = partition(tasks, self.config.batch_size)?;
        let total_batches = batches.len();

        let policy = self.config.retry_policy();
        let executor = RetryExecutor::new(&policy)
            .with_observer(self.observer.as_ref())
            .with_cancel(self.cancel.as_ref());
        let inter_batch_delay = self.config.inter_batch_delay();

        info!(
            tasks = total_tasks,
            batches = total_batches,
            batch_size = self.config.batch_size,
            max_attempts = policy.max_attempts,
            "Starting batch run"
        );

        let mut outcomes = Vec::with_capacity(total_tasks);

        for (index, mut batch) in batches.into_iter().enumerate() {
            if self.is_cancelled() {
                let skipped = total_tasks - outcomes.len();
                self.observer.run_cancelled(skipped);
                outcomes.extend((0..skipped).map(|_| Err(TaskError::Cancelled)));
                break;
            }

            let offset = outcomes.len();
            debug!(
                "Dispatching batch {} ({} tasks, starting at index {})",
                index + 1,
                batch.len(),
                offset
            );

            // join_all yields results in input order regardless of completion order
            let settled = join_all(
                batch
                    .iter_mut()
                    .enumerate()
                    .map(|(i, task)| executor.run(offset + i, task)),
            )
            .await;

            let failed = settled.iter().filter(|outcome| outcome.is_err()).count();
            outcomes.extend(settled);
            self.observer.batch_settled(index + 1, total_batches, failed);

            let is_last = index + 1 == total_batches;
            if !inter_batch_delay.is_zero() && !is_last {
                self.observer.inter_batch_pause(inter_batch_delay);
                tokio::select! {
                    _ = sleep(inter_batch_delay) => {}
                    _ = wait_cancelled(self.cancel.as_ref()) => {}
                }
            }
        }

        Ok(outcomes)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}
