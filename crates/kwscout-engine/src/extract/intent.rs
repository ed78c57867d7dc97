//! Lexical intent scoring. Pure and offline; cannot fail.

use kwscout_core::IntentClarity;
use serde::Serialize;

/// One weighted signal category. Phrases are lowercase and matched as
/// substrings; only the first matching phrase counts.
pub(crate) struct SignalCategory {
    pub(crate) label: &'static str,
    pub(crate) weight: u32,
    pub(crate) phrases: &'static [&'static str],
}

pub(crate) const PAIN_PHRASES: &[&str] = &[
    "struggling with",
    "how to fix",
    "error",
    "broken",
    "not working",
    "failed",
    "manual",
    "tedious",
    "time consuming",
    "slow",
    "cannot",
    "doesn't work",
    "help with",
    "problem with",
    "issue with",
];

pub(crate) const CATEGORIES: &[SignalCategory] = &[
    SignalCategory {
        label: "pain",
        weight: 40,
        phrases: PAIN_PHRASES,
    },
    SignalCategory {
        label: "tool",
        weight: 30,
        phrases: &[
            "calculator",
            "generator",
            "converter",
            "maker",
            "checker",
            "editor",
            "builder",
            "tool",
            "app",
            "software",
            "online",
            "free",
            "downloader",
            "analyzer",
            "optimizer",
            "tracker",
            "detector",
        ],
    },
    SignalCategory {
        label: "comparison",
        weight: 25,
        phrases: &[
            "vs",
            "versus",
            "alternative",
            "better than",
            "instead of",
            "replace",
            "compare",
            "difference between",
        ],
    },
    SignalCategory {
        label: "bulk",
        weight: 25,
        phrases: &[
            "bulk",
            "batch",
            "api",
            "export",
            "team",
            "enterprise",
            "multiple",
            "mass",
            "auto",
            "automatic",
            "automation",
        ],
    },
    SignalCategory {
        label: "speed",
        weight: 20,
        phrases: &[
            "fast",
            "quick",
            "instant",
            "real-time",
            "live",
            "automatic",
            "auto",
        ],
    },
];

pub(crate) const LONG_TAIL_WORDS: std::ops::RangeInclusive<usize> = 2..=4;
pub(crate) const LONG_TAIL_BONUS: u32 = 15;
pub(crate) const MAX_INTENT_SCORE: u32 = 100;

/// What the user is trying to do, matched on whole tokens.
const USER_INTENTS: &[(&str, &[&str])] = &[
    ("calculate", &["calculator", "calculate", "compute", "formula"]),
    ("convert", &["converter", "convert", "to", "from"]),
    ("generate", &["generator", "generate", "create", "maker"]),
    ("check", &["checker", "check", "verify", "validate", "test"]),
    ("compare", &["vs", "versus", "compare", "difference"]),
    ("download", &["download", "downloader", "get", "save"]),
    ("edit", &["editor", "edit", "modify", "change"]),
    ("analyze", &["analyzer", "analyze", "analytics", "report"]),
    ("track", &["tracker", "track", "monitor", "follow"]),
    ("search", &["finder", "search", "find", "lookup"]),
];

/// Output of the lexical extractor for one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentSignal {
    /// Sum of matched category weights plus the long-tail bonus, capped.
    pub score: u32,
    /// `"category:phrase"` per matched category, then `"long_tail:N"`.
    pub signals: Vec<String>,
    /// Explanatory goal labels; never part of the score.
    pub user_intents: Vec<String>,
    pub clarity: IntentClarity,
}

/// Scores one keyword. Matching is case-insensitive.
#[must_use]
pub fn extract_intent(text: &str) -> IntentSignal {
    let lower = text.to_lowercase();
    let mut score = 0u32;
    let mut signals = Vec::new();

    for category in CATEGORIES {
        if let Some(phrase) = category.phrases.iter().find(|p| lower.contains(**p)) {
            score += category.weight;
            signals.push(format!("{}:{phrase}", category.label));
        }
    }

    let word_count = lower.split_whitespace().count();
    if LONG_TAIL_WORDS.contains(&word_count) {
        score += LONG_TAIL_BONUS;
        signals.push(format!("long_tail:{word_count}"));
    }

    let user_intents = detect_user_intents(&lower);
    IntentSignal {
        score: score.min(MAX_INTENT_SCORE),
        signals,
        clarity: IntentClarity::from_count(user_intents.len()),
        user_intents,
    }
}

fn detect_user_intents(lower: &str) -> Vec<String> {
    let tokens: Vec<&str> = lower
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| !t.is_empty())
        .collect();

    USER_INTENTS
        .iter()
        .filter(|(_, words)| words.iter().any(|w| tokens.contains(w)))
        .map(|(label, _)| (*label).to_owned())
        .collect()
}

/// True when the text contains any pain-point phrase.
pub(crate) fn has_pain_phrase(lower: &str) -> bool {
    PAIN_PHRASES.iter().any(|p| lower.contains(p))
}
