use kwscout_core::{AppConfig, ScoredCandidate};
use kwscout_engine::{score_offline, ScoringEngine};

use crate::run::load_scoring;

/// Scores keywords from their text alone and prints the breakdown.
///
/// # Errors
///
/// Returns an error if the configured scoring profile is invalid.
pub(crate) fn run_score(config: &AppConfig, keywords: &[String]) -> anyhow::Result<()> {
    let engine = ScoringEngine::new(load_scoring(config)?);
    let report = score_offline(keywords, &engine);
    if report.candidates.is_empty() {
        println!("no scorable keywords given");
        return Ok(());
    }
    for row in &report.candidates {
        print!("{}", describe(row));
    }
    Ok(())
}

fn describe(row: &ScoredCandidate) -> String {
    let c = &row.candidate;
    let b = &row.breakdown;
    let intents = if c.user_intents.is_empty() {
        "-".to_owned()
    } else {
        c.user_intents.join(", ")
    };
    let reason = c.competition_reason.as_deref().unwrap_or("no competition data");
    format!(
        "{key}\n  score {score:.1} -> {decision}\n  trend {trend:.0}  intent {intent:.0}  \
         competition {competition:.0} ({tier}: {reason})  buildability {build:.0}\n  \
         signals: {signals}\n  user intent: {intents} ({clarity})\n",
        key = c.key,
        score = row.final_score,
        decision = row.decision,
        trend = b.trend,
        intent = b.intent,
        competition = b.competition,
        tier = c.competition_tier,
        build = b.buildability,
        signals = c.intent_signals.join(", "),
        clarity = c.intent_clarity,
    )
}
