//! Candidate keyword records and the deduplicating candidate set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scoring::Thresholds;

/// Where a candidate was first discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Autocomplete sweep over a seed word.
    Mined,
    /// Rising related query, or a deep sweep over one.
    Trend,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::Mined => write!(f, "mined"),
            Provenance::Trend => write!(f, "trend"),
        }
    }
}

/// Competitive-landscape bucket derived from the top search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompetitionTier {
    Low,
    Medium,
    High,
    /// The extractor could not classify (request failure or no results).
    #[default]
    Unknown,
}

impl std::fmt::Display for CompetitionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompetitionTier::Low => write!(f, "LOW"),
            CompetitionTier::Medium => write!(f, "MEDIUM"),
            CompetitionTier::High => write!(f, "HIGH"),
            CompetitionTier::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// How many distinct user goals the keyword text names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentClarity {
    #[default]
    None,
    Single,
    Compound,
}

impl IntentClarity {
    #[must_use]
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => IntentClarity::None,
            1 => IntentClarity::Single,
            _ => IntentClarity::Compound,
        }
    }
}

impl std::fmt::Display for IntentClarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntentClarity::None => write!(f, "none"),
            IntentClarity::Single => write!(f, "single"),
            IntentClarity::Compound => write!(f, "compound"),
        }
    }
}

/// Final recommendation for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    BuildNow,
    Watch,
    Drop,
}

impl Decision {
    /// Maps a final score onto a decision. Both thresholds are closed lower
    /// bounds, so a score equal to a threshold lands in the higher bucket and
    /// anything in between resolves to the lower one.
    #[must_use]
    pub fn from_score(final_score: f64, thresholds: &Thresholds) -> Self {
        if final_score >= thresholds.build_now {
            Decision::BuildNow
        } else if final_score >= thresholds.watch {
            Decision::Watch
        } else {
            Decision::Drop
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::BuildNow => write!(f, "BUILD_NOW"),
            Decision::Watch => write!(f, "WATCH"),
            Decision::Drop => write!(f, "DROP"),
        }
    }
}

/// Popularity ratio as seen by the scoring engine.
///
/// An observed ratio of `0.0` and a ratio that was never returned are
/// different states and score differently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatioSignal {
    Observed { ratio: f64, growth: f64 },
    /// No trend data; scored at the baseline tier.
    AssumedBaseline,
}

/// Normalize raw keyword text into its join/dedup key: trimmed, lowercase,
/// internal whitespace runs collapsed to a single space.
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// One keyword tracked through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub key: String,
    /// Seed (or trending term) this candidate was discovered from.
    pub seed: String,
    pub provenance: Provenance,
    pub word_count: usize,
    /// Candidate interest over benchmark interest. `None` when the trend
    /// source never returned data for this key.
    pub popularity_ratio: Option<f64>,
    /// Last minus first value of the candidate's interest series.
    pub growth: Option<f64>,
    pub competition_tier: CompetitionTier,
    /// Set when the top results are dominated by forums and blogs with no
    /// large incumbent present.
    pub low_competition: bool,
    pub top_domains: Vec<String>,
    /// Why the competition tier was chosen. `None` until a competition
    /// signal is merged.
    pub competition_reason: Option<String>,
    pub intent_score: u32,
    pub intent_signals: Vec<String>,
    pub user_intents: Vec<String>,
    pub intent_clarity: IntentClarity,
}

impl Candidate {
    /// Builds an unenriched candidate. Returns `None` when `raw` normalizes
    /// to an empty key.
    #[must_use]
    pub fn new(raw: &str, seed: &str, provenance: Provenance) -> Option<Self> {
        let key = normalize_key(raw);
        if key.is_empty() {
            return None;
        }
        let word_count = key.split(' ').count();
        Some(Self {
            key,
            seed: seed.to_string(),
            provenance,
            word_count,
            popularity_ratio: None,
            growth: None,
            competition_tier: CompetitionTier::Unknown,
            low_competition: false,
            top_domains: Vec::new(),
            competition_reason: None,
            intent_score: 0,
            intent_signals: Vec::new(),
            user_intents: Vec::new(),
            intent_clarity: IntentClarity::None,
        })
    }

    #[must_use]
    pub fn ratio_signal(&self) -> RatioSignal {
        match self.popularity_ratio {
            Some(ratio) => RatioSignal::Observed {
                ratio,
                growth: self.growth.unwrap_or(0.0),
            },
            None => RatioSignal::AssumedBaseline,
        }
    }
}

/// Result of offering a raw string to a [`CandidateSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Added,
    /// The key was already present; the earlier record is kept.
    Duplicate,
    /// The raw text was blank after normalization.
    Empty,
}

/// Candidates keyed by normalized text. Iteration is in key order, so the
/// set's contents never depend on the order sources answered in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    entries: BTreeMap<String, Candidate>,
}

impl CandidateSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `raw` under its normalized key. First-seen wins.
    pub fn insert(&mut self, raw: &str, seed: &str, provenance: Provenance) -> InsertOutcome {
        let Some(candidate) = Candidate::new(raw, seed, provenance) else {
            return InsertOutcome::Empty;
        };
        if self.entries.contains_key(&candidate.key) {
            return InsertOutcome::Duplicate;
        }
        self.entries.insert(candidate.key.clone(), candidate);
        InsertOutcome::Added
    }

    /// Moves every candidate from `other` into `self`, keeping existing keys.
    pub fn extend(&mut self, other: CandidateSet) {
        for (key, candidate) in other.entries {
            self.entries.entry(key).or_insert(candidate);
        }
    }

    /// Keeps only the candidates whose key is in `keys`.
    pub fn retain_keys(&mut self, keys: &std::collections::BTreeSet<String>) {
        self.entries.retain(|k, _| keys.contains(k));
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Candidate> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Candidate> {
        self.entries.values_mut()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Candidate> {
        self.entries.into_values().collect()
    }
}

impl FromIterator<Candidate> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        let mut set = Self::new();
        for candidate in iter {
            set.entries.entry(candidate.key.clone()).or_insert(candidate);
        }
        set
    }
}

/// Per-component points behind a final score, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub trend: f64,
    pub intent: f64,
    pub competition: f64,
    pub buildability: f64,
}

/// A merged candidate with its score and decision: one row of the output table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub breakdown: ScoreBreakdown,
    pub final_score: f64,
    pub decision: Decision,
}
