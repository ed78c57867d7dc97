//! Pipeline orchestration: mine, expand, sample, enrich, merge, score.
//!
//! Every stage is total. External failures end up in [`RunStats`] and as
//! missing signals on the affected candidates; nothing here returns an
//! error.

use std::collections::BTreeMap;

use kwscout_core::{
    AppConfig, CandidateSet, Decision, FetchPolicy, InsertOutcome, Provenance, ScoredCandidate,
};
use kwscout_sources::{SerpSource, SuggestionSource, TrendSource};
use serde::Serialize;

use crate::expansion::{expand_trends, ExpansionOptions};
use crate::extract::{
    extract_competition, extract_intent, extract_popularity, heuristic_competition,
};
use crate::fetcher::{FetchFailure, RateLimitedFetcher};
use crate::merge::{merge_signals, SignalTables};
use crate::miner::{CandidateMiner, MinerOptions};
use crate::sampling::sample_candidates;
use crate::scoring::ScoringEngine;

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    pub miner: MinerOptions,
    pub expansion: ExpansionOptions,
    /// Candidate sets above this size are sampled down before enrichment.
    pub max_candidates: usize,
    pub sample_seed: u64,
    pub benchmark_term: String,
    pub trend_window: String,
    pub trends_policy: FetchPolicy,
    pub serp_policy: FetchPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            miner: MinerOptions::default(),
            expansion: ExpansionOptions::default(),
            max_candidates: 100,
            sample_seed: 42,
            benchmark_term: "GPTs".to_owned(),
            trend_window: "now 7-d".to_owned(),
            trends_policy: FetchPolicy {
                batch_size: 2,
                call_delay_ms: 8_000,
                batch_delay_ms: 20_000,
                max_retries: 3,
                backoff_base_ms: 8_000,
            },
            serp_policy: FetchPolicy {
                batch_size: 1,
                call_delay_ms: 1_500,
                batch_delay_ms: 1_500,
                max_retries: 2,
                backoff_base_ms: 1_500,
            },
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            miner: MinerOptions {
                letter_delay_ms: config.suggest_delay_ms,
                ..MinerOptions::default()
            },
            expansion: ExpansionOptions::default(),
            max_candidates: config.max_candidates,
            sample_seed: config.sample_seed,
            benchmark_term: config.benchmark_term.clone(),
            trend_window: config.trend_window.clone(),
            trends_policy: config.trends_policy(),
            serp_policy: config.serp_policy(),
        }
    }

    /// No pauses anywhere; for tests and offline runs.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            miner: MinerOptions::immediate(),
            trends_policy: FetchPolicy::immediate(2, 3),
            serp_policy: FetchPolicy::immediate(1, 2),
            ..Self::default()
        }
    }
}

/// Accounting for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub total: usize,
    pub build_now: usize,
    pub watch: usize,
    pub drop: usize,
    pub mean_score: f64,
    pub expansion_failures: Vec<FetchFailure>,
    pub trend_failures: Vec<FetchFailure>,
    pub serp_failures: Vec<FetchFailure>,
    /// Candidates removed by sampling before enrichment.
    pub sampled_out: usize,
}

impl RunStats {
    fn tally(&mut self, scored: &[ScoredCandidate]) {
        self.total = scored.len();
        self.build_now = 0;
        self.watch = 0;
        self.drop = 0;
        for row in scored {
            match row.decision {
                Decision::BuildNow => self.build_now += 1,
                Decision::Watch => self.watch += 1,
                Decision::Drop => self.drop += 1,
            }
        }
        self.mean_score = if scored.is_empty() {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let denom = scored.len() as f64;
            scored.iter().map(|r| r.final_score).sum::<f64>() / denom
        };
    }
}

/// The output table, best first, plus run accounting.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub candidates: Vec<ScoredCandidate>,
    pub stats: RunStats,
}

/// Wires the sources into the full enrichment-and-scoring flow. The trend
/// and SERP sources are optional; without them trend signals stay missing
/// and competition falls back to the lexical heuristic.
pub struct Pipeline<S, T, R> {
    suggest: S,
    trends: Option<T>,
    serp: Option<R>,
    scoring: ScoringEngine,
    options: PipelineOptions,
}

impl<S, T, R> Pipeline<S, T, R>
where
    S: SuggestionSource,
    T: TrendSource,
    R: SerpSource,
{
    #[must_use]
    pub fn new(
        suggest: S,
        trends: Option<T>,
        serp: Option<R>,
        scoring: ScoringEngine,
        options: PipelineOptions,
    ) -> Self {
        Self {
            suggest,
            trends,
            serp,
            scoring,
            options,
        }
    }

    /// Runs every stage for `seeds`. An empty seed list yields an empty
    /// table.
    pub async fn run(&self, seeds: &[String]) -> PipelineReport {
        let miner = CandidateMiner::new(&self.suggest, self.options.miner);
        let mut candidates = miner.mine(seeds).await;
        tracing::info!(seeds = seeds.len(), candidates = candidates.len(), "mining done");

        let mut expansion_failures = Vec::new();
        if let Some(trends) = &self.trends {
            let fetcher = RateLimitedFetcher::new(self.options.trends_policy);
            let expansion = expand_trends(
                trends,
                &miner,
                &fetcher,
                seeds,
                &self.options.trend_window,
                &self.options.expansion,
            )
            .await;
            let before = candidates.len();
            candidates.extend(expansion.candidates);
            tracing::info!(
                added = candidates.len() - before,
                failures = expansion.failures.len(),
                "trend expansion merged"
            );
            expansion_failures = expansion.failures;
        }

        let sampled_out = sample_candidates(
            &mut candidates,
            self.options.max_candidates,
            self.options.sample_seed,
        );

        let mut report = self.enrich_and_score(candidates).await;
        report.stats.expansion_failures = expansion_failures;
        report.stats.sampled_out = sampled_out;
        report
    }

    /// Enriches an existing candidate set and scores it. No candidate is
    /// dropped here.
    pub async fn enrich_and_score(&self, mut candidates: CandidateSet) -> PipelineReport {
        let keys: Vec<String> = candidates.keys().map(str::to_owned).collect();
        let mut tables = SignalTables::default();
        let mut stats = RunStats::default();

        if let Some(trends) = &self.trends {
            let fetcher = RateLimitedFetcher::new(self.options.trends_policy);
            let outcome = extract_popularity(
                trends,
                &fetcher,
                &keys,
                &self.options.benchmark_term,
                &self.options.trend_window,
            )
            .await;
            tables.trends = outcome.successes;
            stats.trend_failures = outcome.failures;
        } else {
            tracing::info!("no trend source configured, popularity left missing");
        }

        if let Some(serp) = &self.serp {
            let fetcher = RateLimitedFetcher::new(self.options.serp_policy);
            let outcome = extract_competition(serp, &fetcher, &keys).await;
            tables.competition = outcome.successes;
            stats.serp_failures = outcome.failures;
        } else {
            tracing::info!("no SERP source configured, using lexical competition heuristic");
            tables.competition = heuristic_table(&keys);
        }

        tables.intent = intent_table(&keys);
        merge_signals(&mut candidates, &tables);

        let scored = self.scoring.score_all(candidates.into_vec());
        stats.tally(&scored);
        tracing::info!(
            total = stats.total,
            build_now = stats.build_now,
            watch = stats.watch,
            drop = stats.drop,
            trend_failures = stats.trend_failures.len(),
            serp_failures = stats.serp_failures.len(),
            "scoring done"
        );

        PipelineReport {
            candidates: scored,
            stats,
        }
    }
}

/// Scores free text without any external call: intent, heuristic
/// competition and the baseline trend tier. Duplicate texts collapse to one
/// row; blank texts are skipped.
#[must_use]
pub fn score_offline(texts: &[String], scoring: &ScoringEngine) -> PipelineReport {
    let mut candidates = CandidateSet::new();
    for text in texts {
        if candidates.insert(text, text.trim(), Provenance::Mined) == InsertOutcome::Empty {
            tracing::warn!(input = %text, "blank keyword skipped");
        }
    }
    let keys: Vec<String> = candidates.keys().map(str::to_owned).collect();
    let tables = SignalTables {
        trends: BTreeMap::new(),
        competition: heuristic_table(&keys),
        intent: intent_table(&keys),
    };
    merge_signals(&mut candidates, &tables);

    let scored = scoring.score_all(candidates.into_vec());
    let mut stats = RunStats::default();
    stats.tally(&scored);
    PipelineReport {
        candidates: scored,
        stats,
    }
}

fn heuristic_table(keys: &[String]) -> BTreeMap<String, crate::extract::CompetitionSignal> {
    keys.iter()
        .map(|k| (k.clone(), heuristic_competition(k)))
        .collect()
}

fn intent_table(keys: &[String]) -> BTreeMap<String, crate::extract::IntentSignal> {
    keys.iter().map(|k| (k.clone(), extract_intent(k))).collect()
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
