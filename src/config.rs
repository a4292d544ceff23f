//! Configuration Module
//!
//! This module defines all configuration structures for the batch executor.
//! Configuration is loaded from TOML files and parsed using serde.

use crate::{retry::RetryPolicy, BatchError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "BATCH_EXECUTOR_CONFIG";

/// Configuration file used when `BATCH_EXECUTOR_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main configuration structure
///
/// # Example TOML
/// ```toml
/// [executor]
/// batch_size = 10
/// inter_batch_delay_ms = 250
/// max_attempts = 3
/// base_delay_ms = 500
/// exp_factor = 2.0
///
/// [job]
/// manifest = "jobs/items.json"
/// command = "curl"
/// args = ["-fsS", "https://example.com/items/{}"]
///
/// [report]
/// path = "report.json"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub executor: ExecutorConfig,
    pub job: JobConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Batch execution settings
///
/// Every field is optional in TOML and falls back to the defaults below.
///
/// # Fields
/// - `batch_size`: Tasks run concurrently per batch (default 10)
/// - `inter_batch_delay_ms`: Pause between batches, never after the last (default 0)
/// - `max_attempts`: Invocations per task; 0 disables retry (default 0)
/// - `base_delay_ms`: Wait before the first retry (default 500)
/// - `exp_factor`: Backoff multiplier per further retry (default 2.0)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    pub batch_size: usize,
    pub inter_batch_delay_ms: u64,
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub exp_factor: f64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            inter_batch_delay_ms: 0,
            max_attempts: 0,
            base_delay_ms: 500,
            exp_factor: 2.0,
        }
    }
}

impl ExecutorConfig {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Settings are stored in whole milliseconds; a sub-millisecond
    /// remainder rounds up so a positive delay never becomes zero.
    pub fn with_inter_batch_delay(mut self, delay: Duration) -> Self {
        self.inter_batch_delay_ms = ceil_millis(delay);
        self
    }

    /// `base_delay` rounds up to whole milliseconds like the inter-batch delay.
    pub fn with_retry(mut self, max_attempts: u32, base_delay: Duration, exp_factor: f64) -> Self {
        self.max_attempts = max_attempts;
        self.base_delay_ms = ceil_millis(base_delay);
        self.exp_factor = exp_factor;
        self
    }

    pub fn inter_batch_delay(&self) -> Duration {
        Duration::from_millis(self.inter_batch_delay_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.base_delay_ms),
            self.exp_factor,
        )
    }

    /// Check every numeric constraint before a run starts.
    pub fn validate(&self) -> Result<(), BatchError> {
        if self.batch_size == 0 {
            return Err(BatchError::zero_batch_size());
        }
        self.retry_policy().validate()
    }
}

fn ceil_millis(delay: Duration) -> u64 {
    let mut millis = delay.as_millis();
    if delay.subsec_nanos() % 1_000_000 != 0 {
        millis += 1;
    }
    u64::try_from(millis).unwrap_or(u64::MAX)
}

/// Bulk command job
///
/// # Fields
/// - `manifest`: JSON file holding an array of items, one task per item
/// - `command`: Program to run for each item
/// - `args`: Arguments; `{}` is replaced by the item, otherwise the item is appended
/// - `workdir`: Optional working directory for every invocation
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    pub manifest: PathBuf,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub workdir: Option<PathBuf>,
}

/// Run report output
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// Where to write the JSON report; logged only when unset
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.executor.validate()?;
        Ok(config)
    }
}
