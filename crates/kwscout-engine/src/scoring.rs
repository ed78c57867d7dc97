//! Weighted scoring and the build/watch/drop decision.

use std::cmp::Ordering;

use kwscout_core::{
    Candidate, CompetitionTier, Decision, RatioSignal, ScoreBreakdown, ScoredCandidate,
    ScoringConfig,
};

const TOOL_NOUNS: &[&str] = &["calculator", "generator", "converter", "maker", "checker"];
const GENERIC_MODIFIERS: &[&str] = &["online", "free"];

/// Stateless scorer over merged candidates. Every constant comes from the
/// [`ScoringConfig`] it was built with.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    #[must_use]
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Trend points. A missing ratio scores as the baseline tier.
    #[must_use]
    pub fn trend_score(&self, signal: RatioSignal) -> f64 {
        let tiers = &self.config.ratio_tiers;
        let points = &self.config.trend_points;
        match signal {
            RatioSignal::AssumedBaseline => points.baseline,
            RatioSignal::Observed { ratio, growth } => {
                if ratio >= tiers.great && growth > 0.0 {
                    points.great
                } else if ratio >= tiers.good && growth > tiers.good_growth {
                    points.good
                } else if ratio >= tiers.baseline {
                    points.baseline
                } else {
                    points.below
                }
            }
        }
    }

    #[must_use]
    pub fn intent_score(&self, intent_score: u32) -> f64 {
        f64::from(intent_score.min(100))
    }

    /// Competition points. The structural low-competition flag overrides
    /// the tier.
    #[must_use]
    pub fn competition_score(&self, tier: CompetitionTier, low_competition: bool) -> f64 {
        let points = &self.config.competition_points;
        if low_competition {
            return points.structural_low;
        }
        match tier {
            CompetitionTier::Low => points.low,
            CompetitionTier::Medium => points.medium,
            CompetitionTier::High => points.high,
            CompetitionTier::Unknown => points.unknown,
        }
    }

    #[must_use]
    pub fn buildability_score(&self, text: &str) -> f64 {
        let points = &self.config.buildability_points;
        let lower = text.to_lowercase();
        if TOOL_NOUNS.iter().any(|n| lower.contains(n)) {
            points.tool_noun
        } else if GENERIC_MODIFIERS.iter().any(|m| lower.contains(m)) {
            points.generic_modifier
        } else {
            points.default
        }
    }

    #[must_use]
    pub fn breakdown(&self, candidate: &Candidate) -> ScoreBreakdown {
        ScoreBreakdown {
            trend: self.trend_score(candidate.ratio_signal()),
            intent: self.intent_score(candidate.intent_score),
            competition: self
                .competition_score(candidate.competition_tier, candidate.low_competition),
            buildability: self.buildability_score(&candidate.key),
        }
    }

    /// Weighted sum of the breakdown, clamped to `[0, 100]` and rounded to
    /// one decimal place.
    #[must_use]
    pub fn final_score(&self, breakdown: &ScoreBreakdown) -> f64 {
        let w = &self.config.weights;
        let raw = w.trend * breakdown.trend
            + w.intent * breakdown.intent
            + w.competition * breakdown.competition
            + w.buildability * breakdown.buildability;
        round_one_decimal(raw.clamp(0.0, 100.0))
    }

    #[must_use]
    pub fn score(&self, candidate: Candidate) -> ScoredCandidate {
        let breakdown = self.breakdown(&candidate);
        let final_score = self.final_score(&breakdown);
        let decision = Decision::from_score(final_score, &self.config.thresholds);
        ScoredCandidate {
            candidate,
            breakdown,
            final_score,
            decision,
        }
    }

    /// Scores every candidate, best first. Ties are broken by key.
    #[must_use]
    pub fn score_all(&self, candidates: Vec<Candidate>) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> =
            candidates.into_iter().map(|c| self.score(c)).collect();
        scored.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.candidate.key.cmp(&b.candidate.key))
        });
        scored
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
#[path = "scoring_test.rs"]
mod tests;
