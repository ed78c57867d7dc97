use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_SUGGEST_BASE_URL: &str = "https://suggestqueries.google.com/complete/search";
pub const DEFAULT_SERP_BASE_URL: &str = "https://html.duckduckgo.com/html/";
pub const DEFAULT_SCHEDULE_CRON: &str = "0 0 0,6,12,18 * * *";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so tests can drive it from a plain `HashMap`.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Unset and blank are both "not configured".
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("KWSCOUT_ENV", "development"));
    let log_level = or_default("KWSCOUT_LOG_LEVEL", "info");
    let seeds_path = PathBuf::from(or_default("KWSCOUT_SEEDS_PATH", "./words.md"));
    let output_path = PathBuf::from(or_default("KWSCOUT_OUTPUT_PATH", "./data/results.json"));
    let scoring_profile_path = optional("KWSCOUT_SCORING_PROFILE").map(PathBuf::from);

    let user_agent = or_default("KWSCOUT_USER_AGENT", "kwscout/0.1 (keyword-research)");
    let request_timeout_secs = parse_u64("KWSCOUT_REQUEST_TIMEOUT_SECS", "30")?;

    let suggest_base_url = or_default("KWSCOUT_SUGGEST_BASE_URL", DEFAULT_SUGGEST_BASE_URL);
    let suggest_region = or_default("KWSCOUT_SUGGEST_REGION", "us");
    let suggest_language = or_default("KWSCOUT_SUGGEST_LANGUAGE", "en");
    let suggest_delay_ms = parse_u64("KWSCOUT_SUGGEST_DELAY_MS", "200")?;

    let trends_base_url = optional("KWSCOUT_TRENDS_BASE_URL");
    let benchmark_term = or_default("KWSCOUT_BENCHMARK_TERM", "GPTs");
    if benchmark_term.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "KWSCOUT_BENCHMARK_TERM".to_string(),
            reason: "must not be blank".to_string(),
        });
    }
    let trend_window = or_default("KWSCOUT_TREND_WINDOW", "now 7-d");
    let trend_geo = or_default("KWSCOUT_TREND_GEO", "US");
    let trends_batch_size = parse_usize("KWSCOUT_TRENDS_BATCH_SIZE", "2")?;
    let trends_call_delay_ms = parse_u64("KWSCOUT_TRENDS_CALL_DELAY_MS", "8000")?;
    let trends_batch_delay_ms = parse_u64("KWSCOUT_TRENDS_BATCH_DELAY_MS", "20000")?;
    let trends_max_retries = parse_u32("KWSCOUT_TRENDS_MAX_RETRIES", "3")?;
    let trends_backoff_base_ms = parse_u64("KWSCOUT_TRENDS_BACKOFF_BASE_MS", "8000")?;

    let serp_base_url = or_default("KWSCOUT_SERP_BASE_URL", DEFAULT_SERP_BASE_URL);
    let serp_top_n = parse_usize("KWSCOUT_SERP_TOP_N", "5")?;
    let serp_call_delay_ms = parse_u64("KWSCOUT_SERP_CALL_DELAY_MS", "1500")?;

    let max_candidates = parse_usize("KWSCOUT_MAX_CANDIDATES", "100")?;
    let sample_seed = parse_u64("KWSCOUT_SAMPLE_SEED", "42")?;
    let schedule_cron = or_default("KWSCOUT_SCHEDULE_CRON", DEFAULT_SCHEDULE_CRON);

    Ok(AppConfig {
        env,
        log_level,
        seeds_path,
        output_path,
        scoring_profile_path,
        user_agent,
        request_timeout_secs,
        suggest_base_url,
        suggest_region,
        suggest_language,
        suggest_delay_ms,
        trends_base_url,
        benchmark_term,
        trend_window,
        trend_geo,
        trends_batch_size,
        trends_call_delay_ms,
        trends_batch_delay_ms,
        trends_max_retries,
        trends_backoff_base_ms,
        serp_base_url,
        serp_top_n,
        serp_call_delay_ms,
        max_candidates,
        sample_seed,
        schedule_cron,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
