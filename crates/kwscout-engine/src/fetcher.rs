//! Batched, paced, retrying driver for rate-limited external calls.
//!
//! [`RateLimitedFetcher::run`] walks a list of work items in fixed-size
//! batches, one call at a time. Each item is retried with exponential
//! back-off on transient errors; an item that exhausts its attempts is
//! recorded as a [`FetchFailure`] and the batch moves on. The caller always
//! gets both the successes and the failures back.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use kwscout_core::FetchPolicy;
use kwscout_sources::SourceError;
use serde::Serialize;

/// Errors the fetcher can classify as worth retrying.
pub trait RetryClass {
    fn is_retriable(&self) -> bool;
}

impl RetryClass for SourceError {
    fn is_retriable(&self) -> bool {
        SourceError::is_retriable(self)
    }
}

/// An item that never produced a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub item: String,
    pub attempts: u32,
    pub reason: String,
}

/// Successes keyed by item, plus every item that failed. Together they
/// cover each distinct input item exactly once.
#[derive(Debug, Clone)]
pub struct FetchOutcome<T> {
    pub successes: BTreeMap<String, T>,
    pub failures: Vec<FetchFailure>,
}

impl<T> Default for FetchOutcome<T> {
    fn default() -> Self {
        Self {
            successes: BTreeMap::new(),
            failures: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitedFetcher {
    policy: FetchPolicy,
}

impl RateLimitedFetcher {
    #[must_use]
    pub fn new(policy: FetchPolicy) -> Self {
        Self { policy }
    }

    /// Runs `call` once per distinct item, honouring the policy's pacing.
    ///
    /// Repeated items are processed once. `label` tags the log lines.
    pub async fn run<T, E, F, Fut>(
        &self,
        label: &str,
        items: &[String],
        mut call: F,
    ) -> FetchOutcome<T>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: RetryClass + Display,
    {
        let mut seen = BTreeSet::new();
        let unique: Vec<&String> = items.iter().filter(|i| seen.insert(i.as_str())).collect();

        let batch_size = self.policy.effective_batch_size();
        let batch_count = unique.len().div_ceil(batch_size);
        let mut outcome = FetchOutcome::default();

        for (batch_idx, batch) in unique.chunks(batch_size).enumerate() {
            tracing::info!(
                label,
                batch = batch_idx + 1,
                batches = batch_count,
                items = batch.len(),
                "processing batch"
            );

            for (item_idx, item) in batch.iter().enumerate() {
                match self.fetch_one(label, item, &mut call).await {
                    Ok(value) => {
                        outcome.successes.insert((*item).clone(), value);
                    }
                    Err(failure) => {
                        tracing::warn!(
                            label,
                            item = %failure.item,
                            attempts = failure.attempts,
                            reason = %failure.reason,
                            "giving up on item"
                        );
                        outcome.failures.push(failure);
                    }
                }

                if item_idx + 1 < batch.len() {
                    pause(self.policy.call_delay_ms).await;
                }
            }

            if batch_idx + 1 < batch_count {
                tracing::debug!(
                    label,
                    delay_ms = self.policy.batch_delay_ms,
                    "pausing between batches"
                );
                pause(self.policy.batch_delay_ms).await;
            }
        }

        tracing::info!(
            label,
            succeeded = outcome.successes.len(),
            failed = outcome.failures.len(),
            "fetch complete"
        );
        outcome
    }

    pub async fn pause_between_calls(&self) {
        pause(self.policy.call_delay_ms).await;
    }

    /// Runs `call` for a single item with the policy's retries, without any
    /// pacing before or after. Callers that issue dependent calls one by one
    /// pair this with [`RateLimitedFetcher::pause_between_calls`].
    ///
    /// # Errors
    ///
    /// Returns a [`FetchFailure`] once a non-retriable error occurs or the
    /// policy's attempts are used up.
    pub async fn fetch_one<T, E, F, Fut>(
        &self,
        label: &str,
        item: &str,
        call: &mut F,
    ) -> Result<T, FetchFailure>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: RetryClass + Display,
    {
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 1u32;
        loop {
            match call(item.to_owned()).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if !err.is_retriable() || attempt >= max_attempts {
                        return Err(FetchFailure {
                            item: item.to_owned(),
                            attempts: attempt,
                            reason: err.to_string(),
                        });
                    }
                    let delay = self.policy.backoff_for(attempt);
                    tracing::warn!(
                        label,
                        item,
                        attempt,
                        max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "transient error, retrying after back-off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

async fn pause(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

#[cfg(test)]
#[path = "fetcher_test.rs"]
mod tests;
