//! Batch Execution Module
//!
//! This module handles batched, concurrent execution of independent tasks:
//! - Partition: Splits an ordered task list into fixed-size batches
//! - BatchOrchestrator: Runs batches sequentially, tasks within a batch concurrently

mod partition;
pub mod orchestrator;


pub use partition::{into_sequence, partition, partition_value};
pub use orchestrator::BatchOrchestrator;
