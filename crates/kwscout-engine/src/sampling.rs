//! Seeded down-sampling of an oversized candidate set.

use std::collections::BTreeSet;

use kwscout_core::CandidateSet;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Keeps a reproducible random subset of at most `cap` candidates and
/// returns how many were dropped. Sets at or below the cap are untouched.
pub fn sample_candidates(set: &mut CandidateSet, cap: usize, seed: u64) -> usize {
    let total = set.len();
    if total <= cap {
        return 0;
    }

    let keys: Vec<String> = set.keys().map(str::to_owned).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    let keep: BTreeSet<String> = rand::seq::index::sample(&mut rng, total, cap)
        .into_iter()
        .map(|i| keys[i].clone())
        .collect();

    set.retain_keys(&keep);
    tracing::info!(total, kept = cap, seed, "candidate set sampled down");
    total - cap
}
