use std::time::Duration;

/// Pacing and retry policy for one family of rate-limited external calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Items processed per batch. Zero is treated as one.
    pub batch_size: usize,
    /// Pause between consecutive items within a batch.
    pub call_delay_ms: u64,
    /// Pause between batches.
    pub batch_delay_ms: u64,
    /// Total attempts per item. Zero is treated as one.
    pub max_retries: u32,
    /// Wait before retry `n` is `backoff_base_ms * 2^(n-1)`, capped at one minute.
    pub backoff_base_ms: u64,
}

impl FetchPolicy {
    pub const MAX_BACKOFF_MS: u64 = 60_000;

    /// A policy with no pauses, for tests and offline runs.
    #[must_use]
    pub fn immediate(batch_size: usize, max_retries: u32) -> Self {
        Self {
            batch_size,
            call_delay_ms: 0,
            batch_delay_ms: 0,
            max_retries,
            backoff_base_ms: 0,
        }
    }

    #[must_use]
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.max(1)
    }

    /// Wait before the given retry (1-based).
    #[must_use]
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let exp = retry.saturating_sub(1).min(16);
        let ms = self
            .backoff_base_ms
            .saturating_mul(1u64 << exp)
            .min(Self::MAX_BACKOFF_MS);
        Duration::from_millis(ms)
    }
}
