use batch_executor::{
    cancel::CancelToken,
    config::{Config, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH},
    job::run_job,
    BatchOrchestrator,
};
use tracing::{error, info, warn};

/// The main entry point for the batch executor.
///
/// Initializes logging, loads the configuration, wires Ctrl-C to the cancel
/// token and runs the configured bulk job, writing a report if requested.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging using tracing_subscriber.
    tracing_subscriber::fmt::init();

    // Load the configuration from BATCH_EXECUTOR_CONFIG, or the default TOML file.
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&path)?;
    // Log the loaded configuration for debugging and informational purposes.
    info!("Batch executor starting with config: {:?}", config);

    // Shared cancel token; the interrupt listener fires it on Ctrl-C.
    let cancel = CancelToken::new();
    let interrupt = cancel.clone();
    // Listen for Ctrl-C in the background.
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for interrupt: {:?}", e);
            return;
        }
        warn!("Interrupt received, cancelling remaining tasks");
        interrupt.cancel();
    });

    // Build the orchestrator and run the job. Failed items land in the report;
    // only a bad manifest or configuration returns an error here.
    let orchestrator = BatchOrchestrator::new(config.executor.clone()).with_cancel_token(cancel);
    let report = run_job(&config.job, &orchestrator).await?;

    // Summarize the run.
    info!(
        total = report.total,
        succeeded = report.succeeded,
        failed = report.failed,
        cancelled = report.cancelled,
        "Run finished"
    );

    // Write the JSON report if a path is configured.
    if let Some(path) = &config.report.path {
        report.write_json(path)?;
        info!("Report written to {}", path.display());
    }

    Ok(())
}
