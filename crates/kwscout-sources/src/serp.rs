//! Organic-result scraper for the HTML search endpoint.

use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;
use reqwest::{Client, Url};

use crate::error::SourceError;
use crate::http::{build_client, get_text, parse_endpoint};
use crate::SerpSource;

/// The HTML endpoint serves a captcha page to non-browser agents.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

static RESULT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*\bclass="result__a"[^>]*\bhref="([^"]+)""#)
        .expect("valid result link regex")
});

/// Scrapes the top organic result links for a query.
pub struct SerpClient {
    client: Client,
    endpoint: Url,
    top_n: usize,
}

impl SerpClient {
    /// Creates a client that keeps at most `top_n` links per query.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SourceError::InvalidBaseUrl`] if `endpoint` is not a valid URL.
    pub fn new(endpoint: &str, timeout_secs: u64, top_n: usize) -> Result<Self, SourceError> {
        Ok(Self {
            client: build_client(timeout_secs, BROWSER_USER_AGENT)?,
            endpoint: parse_endpoint(endpoint)?,
            top_n,
        })
    }
}

impl SerpSource for SerpClient {
    async fn top_results(&self, query: &str) -> Result<Vec<String>, SourceError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("q", query);

        let body = get_text(self.client.get(url), "serp").await?;
        let links = extract_result_links(&body, self.top_n);
        tracing::debug!(query, links = links.len(), "serp results parsed");
        Ok(links)
    }
}

/// Pulls result hrefs out of the HTML in document order, unwrapping the
/// engine's `uddg=` redirect links.
pub(crate) fn extract_result_links(html: &str, limit: usize) -> Vec<String> {
    RESULT_LINK_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| resolve_href(m.as_str()))
        .take(limit)
        .collect()
}

fn resolve_href(raw: &str) -> Option<String> {
    let href = raw.replace("&amp;", "&");

    if let Some(idx) = href.find("uddg=") {
        let encoded = href[idx + "uddg=".len()..]
            .split('&')
            .next()
            .unwrap_or_default();
        let target = percent_decode_str(encoded).decode_utf8().ok()?.into_owned();
        return (!target.is_empty()).then_some(target);
    }

    if let Some(rest) = href.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }

    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href);
    }

    None
}
