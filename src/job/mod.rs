//! Bulk Command Job Module
//!
//! Runs one external command per manifest item through the batch orchestrator:
//! - CommandTask: A single command invocation built from a manifest item
//! - Manifest: Loads the JSON array of items
//! - RunReport: Serializable summary of every item's outcome

mod command;
mod manifest;
mod report;
mod runner;


pub use command::{CommandTask, JobError, render_item};
pub use manifest::{load_manifest, parse_manifest};
pub use report::{OutcomeRecord, OutcomeStatus, RunReport};
pub use runner::run_job;
