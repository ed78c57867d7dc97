mod output;
mod run;
mod schedule;
mod score;
mod seeds;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::run::RunArgs;

#[derive(Debug, Parser)]
#[command(name = "kwscout")]
#[command(about = "Keyword opportunity discovery and scoring")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Mine, enrich and score candidates, then write the result table
    Run(RunArgs),
    /// Score keywords offline from their text alone
    Score {
        /// Keywords to score
        #[arg(required = true)]
        keywords: Vec<String>,
    },
    /// List the seeds parsed from the seed file
    Seeds {
        /// Seed file (defaults to `KWSCOUT_SEEDS_PATH`)
        #[arg(long)]
        seeds: Option<PathBuf>,
    },
    /// Run the pipeline on a cron schedule until Ctrl-C
    Schedule {
        /// Six-field cron expression (defaults to `KWSCOUT_SCHEDULE_CRON`)
        #[arg(long)]
        cron: Option<String>,
        /// Use the trend source for expansion and popularity
        #[arg(long)]
        trends: bool,
        /// Look up result pages for competition
        #[arg(long)]
        serp: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = kwscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Run(args)) => run::run_command(&config, &args).await,
        Some(Commands::Score { keywords }) => score::run_score(&config, &keywords),
        Some(Commands::Seeds { seeds: path }) => {
            seeds::run_seeds(path.as_deref().unwrap_or(&config.seeds_path))
        }
        Some(Commands::Schedule { cron, trends, serp }) => {
            schedule::run_schedule(config, cron, trends, serp).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
