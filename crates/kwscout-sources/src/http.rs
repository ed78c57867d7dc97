//! Shared HTTP plumbing for the source clients.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::SourceError;

/// Builds a `reqwest::Client` with the configured timeout and `User-Agent`.
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the client cannot be constructed.
pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, SourceError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Parses an endpoint URL exactly as given.
pub(crate) fn parse_endpoint(base_url: &str) -> Result<Url, SourceError> {
    Url::parse(base_url).map_err(|e| SourceError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

/// Parses a service root, normalised to end with exactly one slash so that
/// relative joins append to the path instead of replacing its last segment.
pub(crate) fn parse_root(base_url: &str) -> Result<Url, SourceError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    parse_endpoint(&normalised)
}

/// Sends a GET request and returns the body of a 2xx response.
///
/// # Errors
///
/// - [`SourceError::RateLimited`] on HTTP 429 (honours a numeric `Retry-After`).
/// - [`SourceError::UnexpectedStatus`] on any other non-2xx status.
/// - [`SourceError::Http`] on network or body-read failure.
pub(crate) async fn get_text(
    request: reqwest::RequestBuilder,
    service: &'static str,
) -> Result<String, SourceError> {
    let response = request.send().await?;
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(SourceError::RateLimited {
            service,
            retry_after_secs,
        });
    }

    if !status.is_success() {
        return Err(SourceError::UnexpectedStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }

    Ok(response.text().await?)
}
