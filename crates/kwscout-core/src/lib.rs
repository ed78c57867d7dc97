//! Shared data model and configuration for kwscout.

pub mod app_config;
pub mod candidate;
pub mod config;
pub mod policy;
pub mod scoring;
pub mod seeds;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use candidate::{
    normalize_key, Candidate, CandidateSet, CompetitionTier, Decision, InsertOutcome,
    IntentClarity, Provenance, RatioSignal, ScoreBreakdown, ScoredCandidate,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use policy::FetchPolicy;
pub use scoring::{load_scoring_profile, parse_scoring_profile, ScoringConfig, Thresholds};
pub use seeds::{load_seed_words, parse_seed_words, SeedList, SkippedLine, DEFAULT_SEEDS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read scoring profile {path}: {source}")]
    ProfileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scoring profile: {0}")]
    ProfileParse(#[source] serde_yaml::Error),

    #[error("failed to read seed file {path}: {source}")]
    SeedsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}
