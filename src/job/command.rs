//! Command Task Module
//!
//! Builds and executes one external command for a manifest item.

use crate::config::JobConfig;
use serde_json::Value;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, warn};

/// Placeholder replaced by the item in command arguments
const ITEM_PLACEHOLDER: &str = "{}";

/// Failure of a single command invocation
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("Failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` exited with {status}: {stderr}")]
    ExitStatus {
        program: String,
        status: String,
        stderr: String,
    },
}

/// One command invocation for one manifest item
#[derive(Debug, Clone, PartialEq)]
pub struct CommandTask {
    pub program: String,
    pub args: Vec<String>,
    pub workdir: Option<PathBuf>,
}

impl CommandTask {
    /// Build the invocation for `item`
    ///
    /// Every `{}` in the configured arguments is replaced by the rendered item.
    /// If no argument contains the placeholder, the item is appended instead.
    pub fn for_item(job: &JobConfig, item: &Value) -> Self {
        let rendered = render_item(item);
        let mut substituted = false;

        let mut args: Vec<String> = job
            .args
            .iter()
            .map(|arg| {
                if arg.contains(ITEM_PLACEHOLDER) {
                    substituted = true;
                    arg.replace(ITEM_PLACEHOLDER, &rendered)
                } else {
                    arg.clone()
                }
            })
            .collect();

        if !substituted {
            args.push(rendered);
        }

        Self {
            program: job.command.clone(),
            args,
            workdir: job.workdir.clone(),
        }
    }

    /// Run the command once
    ///
    /// # Returns
    /// * `Ok(stdout)` trimmed, if the command exits successfully
    /// * `Err(JobError)` if it cannot be spawned or exits unsuccessfully
    pub async fn execute(&self) -> Result<String, JobError> {
        debug!("Running {} {:?}", self.program, self.args);

        let mut command = Command::new(&self.program);
        command.args(&self.args).kill_on_drop(true);
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }

        let output = command.output().await.map_err(|source| JobError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(
                program = %self.program,
                status = ?output.status.code(),
                "Command failed"
            );
            return Err(JobError::ExitStatus {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Render a manifest item as a command-line argument
///
/// Strings are used verbatim; every other JSON value is serialized.
pub fn render_item(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
