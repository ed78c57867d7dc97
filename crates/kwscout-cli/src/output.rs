use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use kwscout_core::ScoredCandidate;
use kwscout_engine::{PipelineReport, RunStats};
use serde::Serialize;

/// On-disk shape of one run.
#[derive(Debug, Serialize)]
struct ResultsDocument<'a> {
    generated_at: DateTime<Utc>,
    stats: &'a RunStats,
    candidates: &'a [ScoredCandidate],
}

/// Writes the report as pretty JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub(crate) fn write_report(path: &Path, report: &PipelineReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let document = ResultsDocument {
        generated_at: Utc::now(),
        stats: &report.stats,
        candidates: &report.candidates,
    };
    let json = serde_json::to_string_pretty(&document)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Plain-text summary of the best `limit` rows plus the decision counts.
pub(crate) fn render_top(report: &PipelineReport, limit: usize) -> String {
    let stats = &report.stats;
    let mut lines = vec![format!(
        "{} candidates: {} build now, {} watch, {} drop (mean {:.1})",
        stats.total, stats.build_now, stats.watch, stats.drop, stats.mean_score
    )];
    if !stats.trend_failures.is_empty() || !stats.serp_failures.is_empty() {
        lines.push(format!(
            "{} trend and {} SERP lookups failed",
            stats.trend_failures.len(),
            stats.serp_failures.len()
        ));
    }

    lines.extend(
        report
            .candidates
            .iter()
            .take(limit)
            .enumerate()
            .map(|(rank, row)| {
                format!(
                    "{:>3}. {:>5.1}  {:<9}  {:<7}  {}",
                    rank + 1,
                    row.final_score,
                    row.decision.to_string(),
                    row.candidate.competition_tier.to_string(),
                    row.candidate.key
                )
            }),
    );

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
