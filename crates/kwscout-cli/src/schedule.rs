//! Periodic pipeline runs.

use std::sync::Arc;

use kwscout_core::AppConfig;
use kwscout_engine::PipelineOptions;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::run::{build_pipeline, finish};
use crate::seeds::load_seeds;

/// Registers the keyword job on `cron` and runs until Ctrl-C.
///
/// The client setup is checked once before the scheduler starts so a bad
/// configuration fails immediately instead of on the first tick.
///
/// # Errors
///
/// Returns an error if the cron expression or client configuration is
/// invalid, or the scheduler cannot start.
pub(crate) async fn run_schedule(
    config: AppConfig,
    cron: Option<String>,
    trends: bool,
    serp: bool,
) -> anyhow::Result<()> {
    let cron = cron.unwrap_or_else(|| config.schedule_cron.clone());
    build_pipeline(&config, PipelineOptions::from_config(&config), trends, serp)?;

    let config = Arc::new(config);
    let mut scheduler = JobScheduler::new().await?;

    let job_config = Arc::clone(&config);
    let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let config = Arc::clone(&job_config);

        Box::pin(async move {
            tracing::info!("scheduler: starting keyword run");
            match scheduled_run(&config, trends, serp).await {
                Ok(()) => tracing::info!("scheduler: keyword run complete"),
                Err(e) => tracing::error!(error = %e, "scheduler: keyword run failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    tracing::info!(cron = %cron, "scheduler started, press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    tracing::info!("received shutdown signal, stopping scheduler");
    scheduler.shutdown().await?;
    Ok(())
}

async fn scheduled_run(config: &AppConfig, trends: bool, serp: bool) -> anyhow::Result<()> {
    let seeds = load_seeds(&config.seeds_path)?;
    let pipeline = build_pipeline(config, PipelineOptions::from_config(config), trends, serp)?;
    let report = pipeline.run(&seeds).await;
    finish(&report, &config.output_path)
}
