//! The `run` command: one full pipeline pass written to disk.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use kwscout_core::{load_scoring_profile, AppConfig, ScoringConfig};
use kwscout_engine::{Pipeline, PipelineOptions, PipelineReport, ScoringEngine};
use kwscout_sources::{SerpClient, SuggestClient, TrendsClient};

use crate::output::{render_top, write_report};
use crate::seeds::load_seeds;

pub(crate) type LivePipeline = Pipeline<SuggestClient, TrendsClient, SerpClient>;

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Seed file (defaults to `KWSCOUT_SEEDS_PATH`)
    #[arg(long)]
    pub seeds: Option<PathBuf>,
    /// Cap on candidates enriched per run
    #[arg(long)]
    pub max: Option<usize>,
    /// Use the trend source for expansion and popularity
    #[arg(long)]
    pub trends: bool,
    /// Look up result pages for competition
    #[arg(long)]
    pub serp: bool,
    /// Seed for candidate sampling
    #[arg(long)]
    pub sample_seed: Option<u64>,
    /// Output file (defaults to `KWSCOUT_OUTPUT_PATH`)
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Print the plan without calling any external service
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Pipeline options from config with the command-line overrides applied.
    pub(crate) fn pipeline_options(&self, config: &AppConfig) -> PipelineOptions {
        let mut options = PipelineOptions::from_config(config);
        if let Some(max) = self.max {
            options.max_candidates = max;
        }
        if let Some(seed) = self.sample_seed {
            options.sample_seed = seed;
        }
        options
    }
}

/// Runs the pipeline once and writes the table.
///
/// # Errors
///
/// Returns an error if the seed file, scoring profile or client
/// configuration is invalid, or the output file cannot be written.
/// External-service failures never fail the run.
pub(crate) async fn run_command(config: &AppConfig, args: &RunArgs) -> anyhow::Result<()> {
    let seeds = load_seeds(args.seeds.as_deref().unwrap_or(&config.seeds_path))?;
    let options = args.pipeline_options(config);
    let output = args.output.as_deref().unwrap_or(&config.output_path);

    if args.dry_run {
        println!(
            "dry run: {} seed(s), max {} candidates, trends {}, serp {}, output {}",
            seeds.len(),
            options.max_candidates,
            if args.trends { "on" } else { "off" },
            if args.serp { "on" } else { "off" },
            output.display()
        );
        for seed in &seeds {
            println!("  {seed}");
        }
        return Ok(());
    }

    let pipeline = build_pipeline(config, options, args.trends, args.serp)?;
    let report = pipeline.run(&seeds).await;
    finish(&report, output)
}

/// Builds the live pipeline from configuration.
///
/// # Errors
///
/// Returns an error if a base URL is invalid, the trend source is requested
/// without a configured URL, or the scoring profile fails to load.
pub(crate) fn build_pipeline(
    config: &AppConfig,
    options: PipelineOptions,
    use_trends: bool,
    use_serp: bool,
) -> anyhow::Result<LivePipeline> {
    let suggest = SuggestClient::new(
        &config.suggest_base_url,
        config.request_timeout_secs,
        &config.user_agent,
        &config.suggest_region,
        &config.suggest_language,
    )?;

    let trends = if use_trends {
        let base_url = config
            .trends_base_url
            .as_deref()
            .context("trend source requested but KWSCOUT_TRENDS_BASE_URL is not set")?;
        Some(TrendsClient::new(
            base_url,
            config.request_timeout_secs,
            &config.user_agent,
            &config.trend_geo,
        )?)
    } else {
        None
    };

    let serp = if use_serp {
        Some(SerpClient::new(
            &config.serp_base_url,
            config.request_timeout_secs,
            config.serp_top_n,
        )?)
    } else {
        None
    };

    let scoring = ScoringEngine::new(load_scoring(config)?);
    Ok(Pipeline::new(suggest, trends, serp, scoring, options))
}

/// The configured scoring profile, or the built-in defaults.
///
/// # Errors
///
/// Returns an error if the profile file cannot be read or is invalid.
pub(crate) fn load_scoring(config: &AppConfig) -> anyhow::Result<ScoringConfig> {
    match &config.scoring_profile_path {
        Some(path) => Ok(load_scoring_profile(path)?),
        None => Ok(ScoringConfig::default()),
    }
}

/// Writes the report and prints the top of the table.
pub(crate) fn finish(report: &PipelineReport, output: &Path) -> anyhow::Result<()> {
    write_report(output, report)?;
    tracing::info!(
        path = %output.display(),
        rows = report.candidates.len(),
        "results written"
    );
    print!("{}", render_top(report, 10));
    Ok(())
}
