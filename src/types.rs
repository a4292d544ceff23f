use std::fmt;

/// Errors raised before any task is invoked.
///
/// These indicate a caller mistake rather than a transient failure, so the
/// orchestrator aborts the whole run instead of retrying.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    /// A sequence was required but something else was supplied.
    #[error("Expected a sequence to split into batches, got {found}")]
    InvalidInput { found: &'static str },
    /// A numeric setting violates its constraint.
    #[error("{name} {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },
}

impl BatchError {
    pub(crate) fn zero_batch_size() -> Self {
        BatchError::InvalidArgument {
            name: "batch_size",
            reason: "must be greater than zero",
        }
    }
}

/// Terminal failure recorded for a single task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskError<E> {
    /// The task's own error, surfaced verbatim once retries are exhausted.
    Failed(E),
    /// The run was cancelled before the task produced an outcome.
    Cancelled,
}

impl<E> TaskError<E> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TaskError::Cancelled)
    }

    pub fn failure(&self) -> Option<&E> {
        match self {
            TaskError::Failed(e) => Some(e),
            TaskError::Cancelled => None,
        }
    }

    pub fn into_failure(self) -> Option<E> {
        match self {
            TaskError::Failed(e) => Some(e),
            TaskError::Cancelled => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for TaskError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::Failed(e) => write!(f, "Task failed: {}", e),
            TaskError::Cancelled => write!(f, "Task cancelled before completion"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for TaskError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TaskError::Failed(e) => Some(e),
            TaskError::Cancelled => None,
        }
    }
}

/// Terminal result of one task: its success value or its final failure.
pub type Outcome<R, E> = Result<R, TaskError<E>>;
