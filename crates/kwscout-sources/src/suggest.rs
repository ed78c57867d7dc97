//! Autocomplete suggestion client.
//!
//! Speaks the `client=firefox` dialect of the public suggestion endpoint:
//! the response body is a JSON array `[query, [suggestion, ...], ...]`.

use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::SourceError;
use crate::http::{build_client, get_text, parse_endpoint};
use crate::SuggestionSource;

/// HTTP client for the autocomplete endpoint.
pub struct SuggestClient {
    client: Client,
    endpoint: Url,
    region: String,
    language: String,
}

impl SuggestClient {
    /// Creates a client against the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SourceError::InvalidBaseUrl`] if `endpoint` is not a valid URL.
    pub fn new(
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
        region: &str,
        language: &str,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            endpoint: parse_endpoint(endpoint)?,
            region: region.to_owned(),
            language: language.to_owned(),
        })
    }

    /// Fetches raw suggestions for one query.
    ///
    /// # Errors
    ///
    /// - [`SourceError::RateLimited`] / [`SourceError::UnexpectedStatus`] on a
    ///   non-2xx response.
    /// - [`SourceError::Deserialize`] if the body is not JSON.
    /// - [`SourceError::Malformed`] if the body is JSON but not an array.
    pub async fn fetch_suggestions(&self, query: &str) -> Result<Vec<String>, SourceError> {
        let url = self.build_url(query);
        let body = get_text(self.client.get(url), "suggest").await?;
        parse_suggestions(query, &body)
    }

    fn build_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client", "firefox")
            .append_pair("q", query)
            .append_pair("hl", &self.language)
            .append_pair("gl", &self.region);
        url
    }
}

impl SuggestionSource for SuggestClient {
    async fn suggest(&self, query: &str) -> Vec<String> {
        match self.fetch_suggestions(query).await {
            Ok(suggestions) => {
                tracing::debug!(query, count = suggestions.len(), "suggestions fetched");
                suggestions
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "suggestion lookup failed");
                Vec::new()
            }
        }
    }
}

/// Extracts the suggestion list from a `[query, [s, ...]]` payload.
///
/// An array shorter than two elements means "no suggestions". Non-string
/// entries in the list are skipped.
pub(crate) fn parse_suggestions(query: &str, body: &str) -> Result<Vec<String>, SourceError> {
    let value: Value = serde_json::from_str(body).map_err(|e| SourceError::Deserialize {
        context: format!("suggest(q={query})"),
        source: e,
    })?;

    let Value::Array(items) = value else {
        return Err(SourceError::Malformed {
            context: format!("suggest(q={query})"),
            reason: "expected a JSON array".to_owned(),
        });
    };

    let Some(list) = items.get(1) else {
        return Ok(Vec::new());
    };

    match list {
        Value::Array(entries) => Ok(entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect()),
        Value::Null => Ok(Vec::new()),
        _ => Err(SourceError::Malformed {
            context: format!("suggest(q={query})"),
            reason: "second element is not a list".to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_firefox_payload() {
        let body = r#"["calc",["calculator","calculator online",7]]"#;
        let got = parse_suggestions("calc", body).unwrap();
        assert_eq!(got, vec!["calculator", "calculator online"]);
    }

    #[test]
    fn short_array_is_empty() {
        assert!(parse_suggestions("calc", r#"["calc"]"#).unwrap().is_empty());
    }

    #[test]
    fn object_payload_is_malformed() {
        let result = parse_suggestions("calc", r#"{"q":"calc"}"#);
        assert!(matches!(result, Err(SourceError::Malformed { .. })));
    }

    #[test]
    fn html_payload_fails_to_deserialize() {
        let result = parse_suggestions("calc", "<html>sorry</html>");
        assert!(matches!(result, Err(SourceError::Deserialize { .. })));
    }

    #[test]
    fn build_url_encodes_query() {
        let client = SuggestClient::new(
            "https://suggest.example/complete/search",
            5,
            "test",
            "us",
            "en",
        )
        .unwrap();
        let url = client.build_url("a calculator");
        assert_eq!(
            url.as_str(),
            "https://suggest.example/complete/search?client=firefox&q=a+calculator&hl=en&gl=us"
        );
    }
}
