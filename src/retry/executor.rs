//! Retry Executor Module
//!
//! Invokes an operation, and on failure waits out an exponential backoff
//! before invoking it again, until it succeeds or the attempt budget is spent.

use crate::{
    cancel::{CancelToken, wait_cancelled},
    observer::{NoopObserver, ProgressObserver},
    retry::RetryPolicy,
    Outcome, TaskError,
};
use std::fmt::Display;
use std::future::Future;
use tokio::time::sleep;

/// Runs operations under a `RetryPolicy`.
///
/// Holds borrowed collaborators only, so one executor can drive every task
/// of a batch concurrently.
pub struct RetryExecutor<'a> {
    policy: &'a RetryPolicy,
    observer: &'a dyn ProgressObserver,
    cancel: Option<&'a CancelToken>,
}

impl<'a> RetryExecutor<'a> {
    pub fn new(policy: &'a RetryPolicy) -> Self {
        Self {
            policy,
            observer: &NoopObserver,
            cancel: None,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn ProgressObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_cancel(mut self, cancel: Option<&'a CancelToken>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Drive `op` to a terminal outcome.
    ///
    /// `task` identifies the operation in observer notifications.
    ///
    /// # Retry Rules
    /// - `max_attempts == 0`: invoke once and return the result as is
    /// - otherwise: after failure number `n`, give up if `n >= max_attempts`,
    ///   else sleep `policy.delay_for(n)` and invoke again
    ///
    /// # Returns
    /// The first success, the last failure, or `TaskError::Cancelled` if the
    /// cancel token fires first.
    pub async fn run<F, Fut, R, E>(&self, task: usize, mut op: F) -> Outcome<R, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: Display,
    {
        if self.policy.max_attempts == 0 {
            return self.attempt(&mut op).await;
        }

        let mut attempts = 0u32;
        loop {
            let error = match self.attempt(&mut op).await {
                Err(TaskError::Failed(error)) => error,
                settled => return settled,
            };

            attempts += 1;
            if attempts >= self.policy.max_attempts {
                self.observer
                    .attempts_exhausted(task, self.policy.max_attempts, &error);
                return Err(TaskError::Failed(error));
            }

            let delay = self.policy.delay_for(attempts);
            self.observer
                .retry_scheduled(task, attempts, self.policy.max_attempts, delay);

            tokio::select! {
                biased;
                _ = wait_cancelled(self.cancel) => return Err(TaskError::Cancelled),
                _ = sleep(delay) => {}
            }
        }
    }

    /// One invocation, raced against cancellation.
    async fn attempt<F, Fut, R, E>(&self, op: &mut F) -> Outcome<R, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R, E>>,
    {
        // select! builds every branch future up front; check first so a
        // cancelled run never invokes the operation.
        if self.cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(TaskError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = wait_cancelled(self.cancel) => Err(TaskError::Cancelled),
            result = op() => result.map_err(TaskError::Failed),
        }
    }
}

/// Run `op` under `policy` with no observer and no cancellation.
pub async fn run_with_retry<F, Fut, R, E>(op: F, policy: &RetryPolicy) -> Outcome<R, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<R, E>>,
    E: Display,
{
    RetryExecutor::new(policy).run(0, op).await
}
