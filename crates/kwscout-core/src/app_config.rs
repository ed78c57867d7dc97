use std::path::PathBuf;

use crate::policy::FetchPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub seeds_path: PathBuf,
    pub output_path: PathBuf,
    pub scoring_profile_path: Option<PathBuf>,

    pub user_agent: String,
    pub request_timeout_secs: u64,

    pub suggest_base_url: String,
    pub suggest_region: String,
    pub suggest_language: String,
    pub suggest_delay_ms: u64,

    /// `None` disables the trend signal and trend expansion.
    pub trends_base_url: Option<String>,
    pub benchmark_term: String,
    pub trend_window: String,
    pub trend_geo: String,
    pub trends_batch_size: usize,
    pub trends_call_delay_ms: u64,
    pub trends_batch_delay_ms: u64,
    pub trends_max_retries: u32,
    pub trends_backoff_base_ms: u64,

    pub serp_base_url: String,
    pub serp_top_n: usize,
    pub serp_call_delay_ms: u64,

    pub max_candidates: usize,
    pub sample_seed: u64,
    pub schedule_cron: String,
}

impl AppConfig {
    /// Pacing for trend-source calls.
    #[must_use]
    pub fn trends_policy(&self) -> FetchPolicy {
        FetchPolicy {
            batch_size: self.trends_batch_size,
            call_delay_ms: self.trends_call_delay_ms,
            batch_delay_ms: self.trends_batch_delay_ms,
            max_retries: self.trends_max_retries,
            backoff_base_ms: self.trends_backoff_base_ms,
        }
    }

    /// Pacing for SERP lookups: one call at a time, two attempts.
    #[must_use]
    pub fn serp_policy(&self) -> FetchPolicy {
        FetchPolicy {
            batch_size: 1,
            call_delay_ms: self.serp_call_delay_ms,
            batch_delay_ms: self.serp_call_delay_ms,
            max_retries: 2,
            backoff_base_ms: self.serp_call_delay_ms.max(1_000),
        }
    }
}
