//! External collaborators of the keyword pipeline.
//!
//! Each collaborator is a trait so the engine can be driven by in-memory
//! fakes in tests; the HTTP clients in this crate are the production
//! implementations.

use std::future::Future;

pub mod error;
mod http;
pub mod serp;
pub mod suggest;
pub mod trends;

pub use error::SourceError;
pub use serp::SerpClient;
pub use suggest::SuggestClient;
pub use trends::{InterestSeries, RisingQuery, TrendsClient};

/// Autocomplete suggestions for a query. Fails closed: any error yields an
/// empty list.
pub trait SuggestionSource {
    fn suggest(&self, query: &str) -> impl Future<Output = Vec<String>> + Send;
}

/// Relative interest and related-query data for search terms.
pub trait TrendSource {
    /// Interest-over-time series for every term over `window`.
    fn interest_over_time(
        &self,
        terms: &[String],
        window: &str,
    ) -> impl Future<Output = Result<InterestSeries, SourceError>> + Send;

    /// Related queries whose interest is rising for `term`.
    fn rising_queries(
        &self,
        term: &str,
        window: &str,
    ) -> impl Future<Output = Result<Vec<RisingQuery>, SourceError>> + Send;
}

/// Ordered organic result URLs for a query, possibly empty.
pub trait SerpSource {
    fn top_results(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<String>, SourceError>> + Send;
}
