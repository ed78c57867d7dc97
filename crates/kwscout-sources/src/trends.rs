//! Client for the trend gateway.
//!
//! The gateway exposes two JSON endpoints relative to its root:
//!
//! - `GET interest?term=..&term=..&window=..&geo=..` returns
//!   `{"series": {"<term>": [0, 12, 40, ...]}}`
//! - `GET related?term=..&window=..&geo=..` returns
//!   `{"rising": [{"query": "...", "value": 250}]}`

use std::collections::BTreeMap;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::http::{build_client, get_text, parse_root};
use crate::TrendSource;

/// Interest-over-time values per term, as returned by the trend source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterestSeries(BTreeMap<String, Vec<f64>>);

impl InterestSeries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, term: impl Into<String>, values: Vec<f64>) {
        self.0.insert(term.into(), values);
    }

    /// Looks up a term, falling back to a case-insensitive match since
    /// providers echo terms back in their own casing.
    #[must_use]
    pub fn get(&self, term: &str) -> Option<&[f64]> {
        self.0
            .get(term)
            .or_else(|| {
                self.0
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(term))
                    .map(|(_, v)| v)
            })
            .map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(String, Vec<f64>)> for InterestSeries {
    fn from_iter<I: IntoIterator<Item = (String, Vec<f64>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A related query whose interest is rising.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RisingQuery {
    pub query: String,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Deserialize)]
struct InterestResponse {
    #[serde(default)]
    series: Option<BTreeMap<String, Option<Vec<f64>>>>,
}

#[derive(Debug, Deserialize)]
struct RelatedResponse {
    #[serde(default)]
    rising: Option<Vec<RisingQuery>>,
}

/// HTTP client for the trend gateway.
pub struct TrendsClient {
    client: Client,
    base_url: Url,
    geo: String,
}

impl TrendsClient {
    /// Creates a client against the gateway root at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SourceError::InvalidBaseUrl`] if `base_url` is not a valid URL.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        geo: &str,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            base_url: parse_root(base_url)?,
            geo: geo.to_owned(),
        })
    }

    fn build_url(&self, path: &str, terms: &[String], window: &str) -> Result<Url, SourceError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| SourceError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for term in terms {
                pairs.append_pair("term", term);
            }
            pairs.append_pair("window", window);
            pairs.append_pair("geo", &self.geo);
        }
        Ok(url)
    }
}

impl TrendSource for TrendsClient {
    async fn interest_over_time(
        &self,
        terms: &[String],
        window: &str,
    ) -> Result<InterestSeries, SourceError> {
        let url = self.build_url("interest", terms, window)?;
        let body = get_text(self.client.get(url), "trends").await?;
        let series = parse_interest(terms, &body)?;
        tracing::debug!(terms = ?terms, series = series.len(), "interest fetched");
        Ok(series)
    }

    async fn rising_queries(
        &self,
        term: &str,
        window: &str,
    ) -> Result<Vec<RisingQuery>, SourceError> {
        let terms = [term.to_owned()];
        let url = self.build_url("related", &terms, window)?;
        let body = get_text(self.client.get(url), "trends").await?;
        let rising = parse_related(term, &body)?;
        tracing::debug!(term, rising = rising.len(), "related queries fetched");
        Ok(rising)
    }
}

/// Parses an interest payload. A missing or empty `series` object is
/// [`SourceError::NoData`]; `null` series entries are dropped.
pub(crate) fn parse_interest(terms: &[String], body: &str) -> Result<InterestSeries, SourceError> {
    let context = format!("interest({})", terms.join(", "));
    let parsed: InterestResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Deserialize {
            context: context.clone(),
            source: e,
        })?;

    let series: InterestSeries = parsed
        .series
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(term, values)| values.map(|v| (term, v)))
        .collect();

    if series.is_empty() {
        return Err(SourceError::NoData { context });
    }
    Ok(series)
}

/// Parses a related-queries payload. A missing `rising` list is empty.
pub(crate) fn parse_related(term: &str, body: &str) -> Result<Vec<RisingQuery>, SourceError> {
    let parsed: RelatedResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Deserialize {
            context: format!("related({term})"),
            source: e,
        })?;
    Ok(parsed.rising.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn series_lookup_ignores_case() {
        let mut series = InterestSeries::new();
        series.insert("GPTs", vec![50.0, 60.0]);
        assert_eq!(series.get("gpts"), Some([50.0, 60.0].as_slice()));
        assert_eq!(series.get("GPTs"), Some([50.0, 60.0].as_slice()));
        assert!(series.get("other").is_none());
    }

    #[test]
    fn parse_interest_drops_null_series() {
        let body = r#"{"series":{"GPTs":[10,20],"pdf tool":null}}"#;
        let series = parse_interest(&terms(&["GPTs", "pdf tool"]), body).unwrap();
        assert_eq!(series.len(), 1);
        assert!(series.get("pdf tool").is_none());
    }

    #[test]
    fn parse_interest_empty_is_no_data() {
        let result = parse_interest(&terms(&["GPTs"]), r#"{"series":{}}"#);
        assert!(matches!(result, Err(SourceError::NoData { .. })));
        let result = parse_interest(&terms(&["GPTs"]), "{}");
        assert!(matches!(result, Err(SourceError::NoData { .. })));
    }

    #[test]
    fn parse_related_missing_list_is_empty() {
        assert!(parse_related("pdf", "{}").unwrap().is_empty());
    }

    #[test]
    fn parse_related_value_defaults_to_zero() {
        let rising = parse_related("pdf", r#"{"rising":[{"query":"pdf merge"}]}"#).unwrap();
        assert_eq!(rising[0].query, "pdf merge");
        assert!(rising[0].value.abs() < f64::EPSILON);
    }

    #[test]
    fn build_url_repeats_term_param() {
        let client = TrendsClient::new("http://gw.local/trends", 5, "test", "US").unwrap();
        let url = client
            .build_url("interest", &terms(&["GPTs", "pdf tool"]), "now 7-d")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://gw.local/trends/interest?term=GPTs&term=pdf+tool&window=now+7-d&geo=US"
        );
    }
}
