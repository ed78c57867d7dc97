use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn assert_invalid(map: &HashMap<&str, &str>, expected_var: &str) {
    let result = build_app_config(lookup_from_map(map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == expected_var),
        "expected InvalidEnvVar({expected_var}), got: {result:?}"
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test"), Environment::Test);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");

    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.seeds_path, PathBuf::from("./words.md"));
    assert_eq!(cfg.output_path, PathBuf::from("./data/results.json"));
    assert!(cfg.scoring_profile_path.is_none());
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.suggest_base_url, DEFAULT_SUGGEST_BASE_URL);
    assert_eq!(cfg.suggest_region, "us");
    assert_eq!(cfg.suggest_language, "en");
    assert_eq!(cfg.suggest_delay_ms, 200);
    assert!(cfg.trends_base_url.is_none());
    assert_eq!(cfg.benchmark_term, "GPTs");
    assert_eq!(cfg.trend_window, "now 7-d");
    assert_eq!(cfg.trend_geo, "US");
    assert_eq!(cfg.trends_batch_size, 2);
    assert_eq!(cfg.trends_call_delay_ms, 8000);
    assert_eq!(cfg.trends_batch_delay_ms, 20000);
    assert_eq!(cfg.trends_max_retries, 3);
    assert_eq!(cfg.trends_backoff_base_ms, 8000);
    assert_eq!(cfg.serp_base_url, DEFAULT_SERP_BASE_URL);
    assert_eq!(cfg.serp_top_n, 5);
    assert_eq!(cfg.serp_call_delay_ms, 1500);
    assert_eq!(cfg.max_candidates, 100);
    assert_eq!(cfg.sample_seed, 42);
    assert_eq!(cfg.schedule_cron, DEFAULT_SCHEDULE_CRON);
}

#[test]
fn trends_policy_reflects_config() {
    let mut map = HashMap::new();
    map.insert("KWSCOUT_TRENDS_BATCH_SIZE", "4");
    map.insert("KWSCOUT_TRENDS_MAX_RETRIES", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let policy = cfg.trends_policy();
    assert_eq!(policy.batch_size, 4);
    assert_eq!(policy.max_retries, 5);
    assert_eq!(policy.call_delay_ms, 8000);
    assert_eq!(policy.batch_delay_ms, 20000);
}

#[test]
fn trends_base_url_override() {
    let mut map = HashMap::new();
    map.insert("KWSCOUT_TRENDS_BASE_URL", "http://localhost:9000");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.trends_base_url.as_deref(), Some("http://localhost:9000"));
}

#[test]
fn blank_trends_base_url_is_disabled() {
    let mut map = HashMap::new();
    map.insert("KWSCOUT_TRENDS_BASE_URL", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.trends_base_url.is_none());
}

#[test]
fn scoring_profile_override() {
    let mut map = HashMap::new();
    map.insert("KWSCOUT_SCORING_PROFILE", "./profile.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.scoring_profile_path,
        Some(PathBuf::from("./profile.yaml"))
    );
}

#[test]
fn max_candidates_override() {
    let mut map = HashMap::new();
    map.insert("KWSCOUT_MAX_CANDIDATES", "250");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_candidates, 250);
}

#[test]
fn blank_benchmark_term_is_invalid() {
    let mut map = HashMap::new();
    map.insert("KWSCOUT_BENCHMARK_TERM", " ");
    assert_invalid(&map, "KWSCOUT_BENCHMARK_TERM");
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("KWSCOUT_REQUEST_TIMEOUT_SECS", "not-a-number");
    assert_invalid(&map, "KWSCOUT_REQUEST_TIMEOUT_SECS");
}

#[test]
fn trends_batch_size_invalid() {
    let mut map = HashMap::new();
    map.insert("KWSCOUT_TRENDS_BATCH_SIZE", "-1");
    assert_invalid(&map, "KWSCOUT_TRENDS_BATCH_SIZE");
}

#[test]
fn trends_max_retries_invalid() {
    let mut map = HashMap::new();
    map.insert("KWSCOUT_TRENDS_MAX_RETRIES", "three");
    assert_invalid(&map, "KWSCOUT_TRENDS_MAX_RETRIES");
}

#[test]
fn sample_seed_invalid() {
    let mut map = HashMap::new();
    map.insert("KWSCOUT_SAMPLE_SEED", "1.5");
    assert_invalid(&map, "KWSCOUT_SAMPLE_SEED");
}

#[test]
fn serp_top_n_invalid() {
    let mut map = HashMap::new();
    map.insert("KWSCOUT_SERP_TOP_N", "");
    assert_invalid(&map, "KWSCOUT_SERP_TOP_N");
}
