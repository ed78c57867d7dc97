//! Candidate mining: an alphabet sweep over the suggestion source.

use std::time::Duration;

use kwscout_core::{normalize_key, CandidateSet, InsertOutcome, Provenance};
use kwscout_sources::SuggestionSource;

/// Sweep shape and pacing for [`CandidateMiner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinerOptions {
    /// Use every `alphabet_step`-th letter of `a..=z`. Zero is treated as one.
    pub alphabet_step: usize,
    /// Pause after each of the two opening queries.
    pub warmup_delay_ms: u64,
    /// Pause after each letter query.
    pub letter_delay_ms: u64,
}

impl Default for MinerOptions {
    fn default() -> Self {
        Self {
            alphabet_step: 2,
            warmup_delay_ms: 500,
            letter_delay_ms: 200,
        }
    }
}

impl MinerOptions {
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            warmup_delay_ms: 0,
            letter_delay_ms: 0,
            ..Self::default()
        }
    }

    /// The sampled sub-alphabet.
    #[must_use]
    pub fn letters(&self) -> Vec<char> {
        ('a'..='z').step_by(self.alphabet_step.max(1)).collect()
    }
}

/// Expands seed terms into candidates through the suggestion source.
pub struct CandidateMiner<'a, S> {
    source: &'a S,
    options: MinerOptions,
}

impl<'a, S: SuggestionSource> CandidateMiner<'a, S> {
    #[must_use]
    pub fn new(source: &'a S, options: MinerOptions) -> Self {
        Self { source, options }
    }

    /// Queries issued for one seed, in order: the bare seed, the seed with a
    /// trailing space, then `"{c} {seed}"` and `"{seed} {c}"` per letter.
    #[must_use]
    pub fn sweep_queries(&self, seed: &str) -> Vec<String> {
        let mut queries = vec![seed.to_owned(), format!("{seed} ")];
        for c in self.options.letters() {
            queries.push(format!("{c} {seed}"));
            queries.push(format!("{seed} {c}"));
        }
        queries
    }

    /// Sweeps every seed and merges the results. Earlier seeds win when two
    /// seeds surface the same suggestion.
    pub async fn mine(&self, seeds: &[String]) -> CandidateSet {
        let mut all = CandidateSet::new();
        for seed in seeds {
            let found = self.mine_seed(seed, Provenance::Mined, false).await;
            tracing::info!(seed = %seed, candidates = found.len(), "seed mined");
            all.extend(found);
        }
        all
    }

    /// Sweeps one term. With `require_term`, only suggestions that contain
    /// the term (case-insensitively) are kept.
    pub async fn mine_seed(
        &self,
        seed: &str,
        provenance: Provenance,
        require_term: bool,
    ) -> CandidateSet {
        let needle = normalize_key(seed);
        let mut found = CandidateSet::new();
        if needle.is_empty() {
            return found;
        }

        for (idx, query) in self.sweep_queries(&needle).iter().enumerate() {
            let suggestions = self.source.suggest(query).await;
            let mut added = 0usize;
            for raw in &suggestions {
                if require_term && !normalize_key(raw).contains(&needle) {
                    continue;
                }
                match found.insert(raw, &needle, provenance) {
                    InsertOutcome::Added => added += 1,
                    InsertOutcome::Duplicate => {}
                    InsertOutcome::Empty => {
                        tracing::warn!(query = %query, "blank suggestion skipped");
                    }
                }
            }
            tracing::debug!(
                query = %query,
                returned = suggestions.len(),
                added,
                "sweep query done"
            );

            let delay_ms = if idx < 2 {
                self.options.warmup_delay_ms
            } else {
                self.options.letter_delay_ms
            };
            if delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }

        found
    }
}
