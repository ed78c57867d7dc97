//! Competitive landscape from the domains ranking for a keyword.

use kwscout_core::CompetitionTier;
use kwscout_sources::SerpSource;
use serde::Serialize;

use crate::extract::intent::has_pain_phrase;
use crate::fetcher::{FetchOutcome, RateLimitedFetcher};

/// Incumbents whose presence means the keyword is contested.
pub const GIANT_DOMAINS: &[&str] = &[
    "google.com",
    "microsoft.com",
    "adobe.com",
    "apple.com",
    "amazon.com",
    "canva.com",
    "figma.com",
    "notion.so",
    "airtable.com",
];

/// Forums, Q&A sites and blog platforms: a page of these means nobody has
/// built a dedicated answer yet.
pub const WEAK_DOMAINS: &[&str] = &[
    "reddit.com",
    "quora.com",
    "stackoverflow.com",
    "medium.com",
    "dev.to",
    "hashnode.com",
    "blogger.com",
    "wordpress.com",
];

const GENERIC_MODIFIERS: &[&str] = &["free", "online", "simple"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompetitionSignal {
    pub tier: CompetitionTier,
    /// Structurally low competition; scores above a plain `LOW`.
    pub low_competition: bool,
    pub top_domains: Vec<String>,
    pub reason: String,
}

impl CompetitionSignal {
    /// Nothing could be classified.
    #[must_use]
    pub fn unknown(reason: impl Into<String>) -> Self {
        Self {
            tier: CompetitionTier::Unknown,
            low_competition: false,
            top_domains: Vec::new(),
            reason: reason.into(),
        }
    }
}

/// Reduces a result URL to its host without scheme, port or `www.`.
/// Scheme-less input is read as `https://`.
#[must_use]
pub fn bare_domain(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url)
        .or_else(|_| reqwest::Url::parse(&format!("https://{url}")))
        .ok()?;
    let host = parsed.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    host.contains('.').then(|| host.to_owned())
}

fn matches_listed(domain: &str, list: &[&str]) -> bool {
    list.iter().any(|listed| {
        domain == *listed
            || domain
                .strip_suffix(listed)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// Classifies a result page from its domains.
///
/// Any giant wins outright. Two or more weak domains with no giant is
/// structurally low competition; exactly one is `MEDIUM`. A page of
/// unlisted domains is `MEDIUM`; an empty page is `UNKNOWN`.
#[must_use]
pub fn classify_domains(domains: &[String]) -> CompetitionSignal {
    if domains.is_empty() {
        return CompetitionSignal::unknown("no classifiable results");
    }

    let giants: Vec<&str> = domains
        .iter()
        .filter(|d| matches_listed(d, GIANT_DOMAINS))
        .map(String::as_str)
        .collect();
    let weak = domains
        .iter()
        .filter(|d| matches_listed(d, WEAK_DOMAINS))
        .count();

    let (tier, low_competition, reason) = if !giants.is_empty() {
        (
            CompetitionTier::High,
            false,
            format!("incumbents ranking: {}", giants.join(", ")),
        )
    } else if weak >= 2 {
        (
            CompetitionTier::Low,
            true,
            format!("{weak} forum/blog results, no incumbents"),
        )
    } else if weak == 1 {
        (
            CompetitionTier::Medium,
            false,
            "one forum/blog result".to_owned(),
        )
    } else {
        (
            CompetitionTier::Medium,
            false,
            "no listed domains".to_owned(),
        )
    };

    CompetitionSignal {
        tier,
        low_competition,
        top_domains: domains.to_vec(),
        reason,
    }
}

/// Classifies a keyword from its text alone, for runs without a SERP source.
#[must_use]
pub fn heuristic_competition(text: &str) -> CompetitionSignal {
    let lower = text.to_lowercase();
    let tokens: Vec<&str> = lower.split_whitespace().collect();

    let generic = GENERIC_MODIFIERS.iter().any(|m| lower.contains(m));

    let (tier, low_competition, reason) = if generic {
        (CompetitionTier::Medium, false, "generic modifier")
    } else if tokens.len() >= 4 {
        (CompetitionTier::Low, true, "long tail (4+ words)")
    } else if has_pain_phrase(&lower) {
        (CompetitionTier::Low, true, "pain-point phrase")
    } else {
        (CompetitionTier::Medium, false, "default estimate")
    };

    CompetitionSignal {
        tier,
        low_competition,
        top_domains: Vec::new(),
        reason: reason.to_owned(),
    }
}

/// Looks up the result page for every key and classifies it. Keys whose
/// lookup fails are left out of the successes; the caller treats them as
/// `UNKNOWN`.
pub async fn extract_competition<R: SerpSource>(
    source: &R,
    fetcher: &RateLimitedFetcher,
    keys: &[String],
) -> FetchOutcome<CompetitionSignal> {
    fetcher
        .run("serp", keys, |key| async move {
            let urls = source.top_results(&key).await?;
            let domains: Vec<String> = urls.iter().filter_map(|u| bare_domain(u)).collect();
            Ok::<_, kwscout_sources::SourceError>(classify_domains(&domains))
        })
        .await
}
