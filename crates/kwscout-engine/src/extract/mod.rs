//! Independent per-candidate signal extractors.

pub mod competition;
pub mod intent;
pub mod popularity;

pub use competition::{
    bare_domain, classify_domains, extract_competition, heuristic_competition, CompetitionSignal,
};
pub use intent::{extract_intent, IntentSignal};
pub use popularity::{compute_trend_signal, extract_popularity, TrendSignal};
