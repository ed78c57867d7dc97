//! Keyword discovery, enrichment and scoring.
//!
//! Data flows miner → fetcher-backed extractors → merge → scoring. The
//! [`Pipeline`] wires those stages to the external sources.

pub mod expansion;
pub mod extract;
pub mod fetcher;
pub mod merge;
pub mod miner;
pub mod pipeline;
pub mod sampling;
pub mod scoring;

pub use expansion::{expand_trends, ExpansionOptions, ExpansionReport};
pub use extract::{
    bare_domain, classify_domains, compute_trend_signal, extract_competition, extract_intent,
    extract_popularity, heuristic_competition, CompetitionSignal, IntentSignal, TrendSignal,
};
pub use fetcher::{FetchFailure, FetchOutcome, RateLimitedFetcher, RetryClass};
pub use merge::{merge_signals, SignalTables};
pub use miner::{CandidateMiner, MinerOptions};
pub use pipeline::{score_offline, Pipeline, PipelineOptions, PipelineReport, RunStats};
pub use sampling::sample_candidates;
pub use scoring::ScoringEngine;
