//! Seed vocabulary loader.
//!
//! Accepts the loosely formatted word lists people keep by hand: one word per
//! line, CSV rows, or tab-separated tables with a numbering column. Lines that
//! yield no alphabetic seed are reported back rather than failing the load.

use std::collections::HashSet;
use std::path::Path;

use crate::ConfigError;

/// Seeds used when no seed file exists.
pub const DEFAULT_SEEDS: &[&str] = &["calculator", "generator", "converter"];

/// A line that produced no seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line_no: usize,
    pub content: String,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedList {
    /// Lowercase, deduplicated, in first-seen order.
    pub seeds: Vec<String>,
    pub skipped: Vec<SkippedLine>,
    /// `true` when the file was missing and [`DEFAULT_SEEDS`] were used.
    pub defaulted: bool,
}

/// Load seed words from `path`, falling back to [`DEFAULT_SEEDS`] when the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::SeedsFileIo`] if the file exists but cannot be read.
pub fn load_seed_words(path: &Path) -> Result<SeedList, ConfigError> {
    if !path.exists() {
        return Ok(SeedList {
            seeds: DEFAULT_SEEDS.iter().map(|s| (*s).to_string()).collect(),
            skipped: Vec::new(),
            defaulted: true,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SeedsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(parse_seed_words(&content))
}

/// Parse seed words from file content.
#[must_use]
pub fn parse_seed_words(content: &str) -> SeedList {
    let mut seeds = Vec::new();
    let mut seen = HashSet::new();
    let mut skipped = Vec::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_line(line) {
            Ok(word) => {
                let word = word.to_lowercase();
                if seen.insert(word.clone()) {
                    seeds.push(word);
                }
            }
            Err(reason) => skipped.push(SkippedLine {
                line_no: idx + 1,
                content: line.to_string(),
                reason,
            }),
        }
    }

    SeedList {
        seeds,
        skipped,
        defaulted: false,
    }
}

fn parse_line(line: &str) -> Result<&str, &'static str> {
    if line.contains('\t') {
        let second = line
            .split('\t')
            .nth(1)
            .map(str::trim)
            .ok_or("tab-separated line has no second column")?;
        let end = second
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(second.len());
        if end == 0 {
            return Err("second column does not start with a word");
        }
        return Ok(&second[..end]);
    }

    if line.contains(',') {
        let first = line.split(',').next().unwrap_or_default().trim();
        if is_alpha_word(first) {
            return Ok(first);
        }
        return Err("first CSV field is not alphabetic");
    }

    if is_alpha_word(line) {
        Ok(line)
    } else {
        Err("line is not a single alphabetic word")
    }
}

fn is_alpha_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic())
}
