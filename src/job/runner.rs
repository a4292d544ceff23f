use crate::{
    batch::BatchOrchestrator,
    config::JobConfig,
    job::{load_manifest, CommandTask, RunReport},
};
use chrono::Utc;
use tracing::info;

/// Run the configured command once per manifest item
///
/// Failed items are recorded in the report; only a bad manifest or an
/// invalid executor configuration fails the whole call.
pub async fn run_job(job: &JobConfig, orchestrator: &BatchOrchestrator) -> anyhow::Result<RunReport> {
    let items = load_manifest(&job.manifest)?;
    info!(
        "Loaded {} items from {}",
        items.len(),
        job.manifest.display()
    );

    let commands: Vec<CommandTask> = items
        .iter()
        .map(|item| CommandTask::for_item(job, item))
        .collect();
    let tasks: Vec<_> = commands
        .iter()
        .map(|command| move || command.execute())
        .collect();

    let started_at = Utc::now();
    let outcomes = orchestrator.run(tasks).await?;
    let finished_at = Utc::now();

    Ok(RunReport::from_outcomes(items, outcomes, started_at, finished_at))
}
