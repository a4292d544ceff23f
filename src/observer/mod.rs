//! Progress Observer Module
//!
//! Diagnostic notifications emitted while a run progresses:
//! - Retry scheduling and exhaustion for individual tasks
//! - Batch completion and inter-batch pauses
//!
//! Observers are injected into the orchestrator, keeping the execution core
//! free of any direct logging.

mod sink;

pub use sink::{NoopObserver, ProgressObserver, TracingObserver};
