//! Left-join of extractor outputs onto the candidate set.

use std::collections::BTreeMap;

use kwscout_core::{CandidateSet, CompetitionTier, IntentClarity};

use crate::extract::{CompetitionSignal, IntentSignal, TrendSignal};

/// Extractor outputs keyed by normalized candidate key. A key missing from a
/// table means that signal is missing for that candidate.
#[derive(Debug, Clone, Default)]
pub struct SignalTables {
    pub trends: BTreeMap<String, TrendSignal>,
    pub competition: BTreeMap<String, CompetitionSignal>,
    pub intent: BTreeMap<String, IntentSignal>,
}

/// Writes every signal onto its candidate, filling gaps with defaults:
/// no ratio, `UNKNOWN` competition, zero intent.
///
/// Fields are assigned, never accumulated, so merging the same tables
/// again leaves the set unchanged. Candidates are never removed and table
/// entries without a candidate are ignored.
pub fn merge_signals(set: &mut CandidateSet, tables: &SignalTables) {
    for candidate in set.iter_mut() {
        let key = candidate.key.as_str();

        if let Some(trend) = tables.trends.get(key) {
            candidate.popularity_ratio = Some(trend.ratio);
            candidate.growth = Some(trend.growth);
        } else {
            candidate.popularity_ratio = None;
            candidate.growth = None;
        }

        if let Some(signal) = tables.competition.get(key) {
            candidate.competition_tier = signal.tier;
            candidate.low_competition = signal.low_competition;
            candidate.top_domains.clone_from(&signal.top_domains);
            candidate.competition_reason = Some(signal.reason.clone());
        } else {
            candidate.competition_tier = CompetitionTier::Unknown;
            candidate.low_competition = false;
            candidate.top_domains.clear();
            candidate.competition_reason = None;
        }

        if let Some(intent) = tables.intent.get(key) {
            candidate.intent_score = intent.score;
            candidate.intent_signals.clone_from(&intent.signals);
            candidate.user_intents.clone_from(&intent.user_intents);
            candidate.intent_clarity = intent.clarity;
        } else {
            candidate.intent_score = 0;
            candidate.intent_signals.clear();
            candidate.user_intents.clear();
            candidate.intent_clarity = IntentClarity::None;
        }
    }

    let orphans = tables
        .trends
        .keys()
        .chain(tables.competition.keys())
        .chain(tables.intent.keys())
        .filter(|k| !set.contains(k))
        .count();
    if orphans > 0 {
        tracing::debug!(orphans, "signal entries without a candidate ignored");
    }
}
