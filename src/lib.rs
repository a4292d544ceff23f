//! This crate runs large sets of independent asynchronous operations in
//! fixed-size batches with bounded concurrency, retrying individual failures
//! with exponential backoff and returning one outcome per operation in input order.

pub mod types; // Outcome and error types shared by every module.
pub mod batch; // Partitioning and the batch orchestrator.
pub mod retry; // Retry policy and per-task retry executor.
pub mod observer; // Progress notifications for retries and batches.
pub mod cancel; // Cancellation signal for an in-progress run.
pub mod job; // Bulk command job driven by the orchestrator.
pub mod config; // Defines and loads configuration.

// Re-export commonly used types and configurations for easier access.
pub use types::*;
pub use config::{Config, ExecutorConfig};
pub use batch::BatchOrchestrator;
pub use retry::{RetryPolicy, run_with_retry};
