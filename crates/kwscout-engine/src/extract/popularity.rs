//! Popularity relative to the benchmark term.

use kwscout_sources::{InterestSeries, SourceError, TrendSource};
use serde::Serialize;

use crate::fetcher::{FetchOutcome, RateLimitedFetcher};

/// Observed trend signal for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendSignal {
    /// Mean candidate interest over mean benchmark interest; `0.0` when the
    /// benchmark mean is not positive.
    pub ratio: f64,
    /// Last minus first value of the candidate series.
    pub growth: f64,
}

/// Derives the signal from a payload holding both series.
///
/// # Errors
///
/// Returns [`SourceError::MissingSeries`] when either series is absent or empty.
pub fn compute_trend_signal(
    series: &InterestSeries,
    keyword: &str,
    benchmark: &str,
) -> Result<TrendSignal, SourceError> {
    let candidate = non_empty(series, keyword)?;
    let reference = non_empty(series, benchmark)?;

    let benchmark_mean = mean(reference);
    let ratio = if benchmark_mean > 0.0 {
        mean(candidate) / benchmark_mean
    } else {
        0.0
    };
    let growth = match (candidate.first(), candidate.last()) {
        (Some(first), Some(last)) => last - first,
        _ => 0.0,
    };
    Ok(TrendSignal { ratio, growth })
}

fn non_empty<'a>(series: &'a InterestSeries, term: &str) -> Result<&'a [f64], SourceError> {
    series
        .get(term)
        .filter(|values| !values.is_empty())
        .ok_or_else(|| SourceError::MissingSeries {
            term: term.to_owned(),
        })
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Fetches the trend signal for every key, paired with the benchmark term.
pub async fn extract_popularity<T: TrendSource>(
    source: &T,
    fetcher: &RateLimitedFetcher,
    keys: &[String],
    benchmark: &str,
    window: &str,
) -> FetchOutcome<TrendSignal> {
    fetcher
        .run("trends", keys, |key| async move {
            let terms = [key.clone(), benchmark.to_owned()];
            let series = source.interest_over_time(&terms, window).await?;
            compute_trend_signal(&series, &key, benchmark)
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(entries: Vec<(&str, Vec<f64>)>) -> InterestSeries {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect()
    }

    #[test]
    fn ratio_is_mean_over_benchmark_mean() {
        let s = series(vec![("pdf merge", vec![10.0, 20.0, 30.0]), ("GPTs", vec![100.0, 100.0])]);
        let signal = compute_trend_signal(&s, "pdf merge", "GPTs").unwrap();
        assert!((signal.ratio - 0.2).abs() < 1e-9);
        assert!((signal.growth - 20.0).abs() < 1e-9);
    }

    #[test]
    fn zero_benchmark_gives_zero_ratio() {
        let s = series(vec![("pdf merge", vec![10.0]), ("GPTs", vec![0.0, 0.0])]);
        let signal = compute_trend_signal(&s, "pdf merge", "GPTs").unwrap();
        assert!(signal.ratio.abs() < f64::EPSILON);
        assert!(signal.growth.abs() < f64::EPSILON);
    }

    #[test]
    fn negative_growth_is_kept() {
        let s = series(vec![("pdf merge", vec![40.0, 10.0]), ("GPTs", vec![50.0])]);
        let signal = compute_trend_signal(&s, "pdf merge", "GPTs").unwrap();
        assert!((signal.growth + 30.0).abs() < 1e-9);
    }

    #[test]
    fn missing_candidate_series_is_an_error() {
        let s = series(vec![("GPTs", vec![50.0])]);
        let result = compute_trend_signal(&s, "pdf merge", "GPTs");
        assert!(matches!(result, Err(SourceError::MissingSeries { ref term }) if term == "pdf merge"));
    }

    #[test]
    fn missing_benchmark_series_is_an_error() {
        let s = series(vec![("pdf merge", vec![5.0])]);
        let result = compute_trend_signal(&s, "pdf merge", "GPTs");
        assert!(matches!(result, Err(SourceError::MissingSeries { ref term }) if term == "GPTs"));
    }

    #[test]
    fn empty_series_counts_as_missing() {
        let s = series(vec![("pdf merge", vec![]), ("GPTs", vec![50.0])]);
        assert!(compute_trend_signal(&s, "pdf merge", "GPTs").is_err());
    }
}
