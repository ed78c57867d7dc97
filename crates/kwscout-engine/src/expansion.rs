//! Trend expansion: rising related queries, one and two levels deep, plus
//! a filtered autocomplete sweep over the first few of them.

use kwscout_core::{CandidateSet, InsertOutcome, Provenance};
use kwscout_sources::{SuggestionSource, TrendSource};

use crate::fetcher::{FetchFailure, RateLimitedFetcher};
use crate::miner::CandidateMiner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionOptions {
    /// Seeds asked for rising queries, taken from the front of the list.
    pub max_seeds: usize,
    /// A first-level query is expanded only while a seed has collected
    /// fewer than this many queries.
    pub collect_limit: usize,
    /// Rising queries kept per second-level lookup.
    pub second_level_top: usize,
    /// First-level queries that also get a filtered autocomplete sweep.
    pub deep_mine_terms: usize,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            max_seeds: 5,
            collect_limit: 20,
            second_level_top: 5,
            deep_mine_terms: 3,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpansionReport {
    pub candidates: CandidateSet,
    pub failures: Vec<FetchFailure>,
}

/// Collects trend-provenance candidates for the leading seeds.
pub async fn expand_trends<T, S>(
    trends: &T,
    miner: &CandidateMiner<'_, S>,
    fetcher: &RateLimitedFetcher,
    seeds: &[String],
    window: &str,
    options: &ExpansionOptions,
) -> ExpansionReport
where
    T: TrendSource,
    S: SuggestionSource,
{
    let mut report = ExpansionReport::default();
    let seeds: Vec<String> = seeds.iter().take(options.max_seeds).cloned().collect();
    if seeds.is_empty() {
        return report;
    }

    let mut related = |term: String| async move { trends.rising_queries(&term, window).await };

    let first_level = fetcher.run("trends-related", &seeds, &mut related).await;
    report.failures.extend(first_level.failures);

    let mut deep_terms: Vec<String> = Vec::new();

    for seed in &seeds {
        let Some(rising) = first_level.successes.get(seed) else {
            continue;
        };

        let mut collected = 0usize;
        for query in rising {
            if report.candidates.insert(&query.query, seed, Provenance::Trend) != InsertOutcome::Empty
                && !deep_terms.contains(&query.query)
            {
                deep_terms.push(query.query.clone());
            }
            collected += 1;

            if collected >= options.collect_limit {
                continue;
            }

            fetcher.pause_between_calls().await;
            match fetcher
                .fetch_one("trends-related-deep", &query.query, &mut related)
                .await
            {
                Ok(sub) => {
                    for sub_query in sub.iter().take(options.second_level_top) {
                        report
                            .candidates
                            .insert(&sub_query.query, seed, Provenance::Trend);
                        collected += 1;
                    }
                }
                Err(failure) => {
                    tracing::warn!(
                        query = %failure.item,
                        reason = %failure.reason,
                        "second-level expansion failed"
                    );
                    report.failures.push(failure);
                }
            }
        }
        tracing::info!(seed = %seed, collected, "trend expansion done");
    }

    for term in deep_terms.iter().take(options.deep_mine_terms) {
        let found = miner.mine_seed(term, Provenance::Trend, true).await;
        tracing::info!(term = %term, candidates = found.len(), "deep sweep done");
        report.candidates.extend(found);
    }

    report
}
