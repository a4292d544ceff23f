//! Run Report Module
//!
//! Summarizes a bulk run: counts per outcome kind plus one record per item,
//! in manifest order.

use crate::{job::JobError, Outcome, TaskError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Succeeded,
    Failed,
    Cancelled,
}

/// Outcome of one manifest item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub index: usize,
    pub item: Value,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of a complete bulk run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub outcomes: Vec<OutcomeRecord>,
}

impl RunReport {
    /// Pair each item with its outcome
    ///
    /// `items` and `outcomes` are index-aligned, as returned by the orchestrator.
    pub fn from_outcomes(
        items: Vec<Value>,
        outcomes: Vec<Outcome<String, JobError>>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let records: Vec<OutcomeRecord> = items
            .into_iter()
            .zip(outcomes)
            .enumerate()
            .map(|(index, (item, outcome))| {
                let (status, output, error) = match outcome {
                    Ok(stdout) => (OutcomeStatus::Succeeded, Some(stdout), None),
                    Err(TaskError::Failed(e)) => (OutcomeStatus::Failed, None, Some(e.to_string())),
                    Err(TaskError::Cancelled) => (OutcomeStatus::Cancelled, None, None),
                };
                OutcomeRecord {
                    index,
                    item,
                    status,
                    output,
                    error,
                }
            })
            .collect();

        let count = |status: OutcomeStatus| records.iter().filter(|r| r.status == status).count();

        Self {
            started_at,
            finished_at,
            total: records.len(),
            succeeded: count(OutcomeStatus::Succeeded),
            failed: count(OutcomeStatus::Failed),
            cancelled: count(OutcomeStatus::Cancelled),
            outcomes: records,
        }
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
