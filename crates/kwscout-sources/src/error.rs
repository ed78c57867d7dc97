use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {service} (retry after {retry_after_secs}s)")]
    RateLimited {
        service: &'static str,
        retry_after_secs: u64,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed payload for {context}: {reason}")]
    Malformed { context: String, reason: String },

    #[error("no data returned for {context}")]
    NoData { context: String },

    #[error("payload has no series for term \"{term}\"")]
    MissingSeries { term: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl SourceError {
    /// Returns `true` for failures that may clear up on a later attempt.
    ///
    /// Retriable:
    /// - [`SourceError::Http`]: timeouts and connection resets.
    /// - [`SourceError::RateLimited`]: HTTP 429.
    /// - [`SourceError::UnexpectedStatus`] with a 5xx status.
    /// - [`SourceError::Deserialize`] and [`SourceError::Malformed`]: a
    ///   throttled provider may answer with an HTML interstitial.
    ///
    /// 4xx statuses, empty data and bad configuration are permanent.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        match self {
            SourceError::Http(_)
            | SourceError::RateLimited { .. }
            | SourceError::Deserialize { .. }
            | SourceError::Malformed { .. } => true,
            SourceError::UnexpectedStatus { status, .. } => *status >= 500,
            SourceError::NoData { .. }
            | SourceError::MissingSeries { .. }
            | SourceError::InvalidBaseUrl { .. } => false,
        }
    }
}
