use std::path::Path;

use kwscout_core::{load_seed_words, SeedList};

/// Loads seeds for a run, logging skipped lines and the default fallback.
///
/// # Errors
///
/// Returns an error if the seed file exists but cannot be read.
pub(crate) fn load_seeds(path: &Path) -> anyhow::Result<Vec<String>> {
    let list = load_seed_words(path)?;
    log_seed_list(path, &list);
    Ok(list.seeds)
}

fn log_seed_list(path: &Path, list: &SeedList) {
    if list.defaulted {
        tracing::warn!(
            path = %path.display(),
            seeds = ?list.seeds,
            "seed file not found, using default seeds"
        );
    }
    for skipped in &list.skipped {
        tracing::warn!(
            line = skipped.line_no,
            content = %skipped.content,
            reason = skipped.reason,
            "seed line skipped"
        );
    }
    tracing::info!(count = list.seeds.len(), "seeds loaded");
}

/// Prints the parsed seed list and any skipped lines.
///
/// # Errors
///
/// Returns an error if the seed file exists but cannot be read.
pub(crate) fn run_seeds(path: &Path) -> anyhow::Result<()> {
    let list = load_seed_words(path)?;
    print!("{}", render_seed_list(path, &list));
    Ok(())
}

fn render_seed_list(path: &Path, list: &SeedList) -> String {
    let mut lines = vec![if list.defaulted {
        format!("{} not found; default seeds:", path.display())
    } else {
        format!("{} seed(s) from {}:", list.seeds.len(), path.display())
    }];
    lines.extend(list.seeds.iter().map(|seed| format!("  {seed}")));
    if !list.skipped.is_empty() {
        lines.push(format!("{} line(s) skipped:", list.skipped.len()));
        lines.extend(list.skipped.iter().map(|skipped| {
            format!(
                "  line {}: {:?} ({})",
                skipped.line_no, skipped.content, skipped.reason
            )
        }));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
