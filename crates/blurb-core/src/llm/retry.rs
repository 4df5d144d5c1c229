//! Retry utilities for rate-limited LLM requests.
//!
//! Only rate limiting (HTTP 429) is retried. Every other failure aborts the run.

use crate::config::RetryConfig;
use crate::error::PipelineError;
use rand::Rng;
use std::time::Duration;

/// Backoff parameters for rate-limited requests.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Delay before the first retry in milliseconds
    pub base_delay_ms: u64,
    /// Cap for a single delay in milliseconds
    pub max_delay_ms: u64,
    /// Max retries per request; `None` retries forever
    pub max_retries: Option<u32>,
    /// Sleep a uniform random fraction of each delay
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            base_delay_ms: config.base_delay_ms,
            max_delay_ms: config.max_delay_ms,
            max_retries: config.ceiling(),
            jitter: config.jitter,
        }
    }
}

impl RetryPolicy {
    /// Whether another retry is allowed after `retries` retries so far.
    pub fn allows(&self, retries: u32) -> bool {
        self.max_retries.map_or(true, |max| retries < max)
    }

    /// Sleep duration before retry number `attempt` (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        let delay = backoff_duration(attempt, self.base_delay_ms, self.max_delay_ms);
        if self.jitter {
            full_jitter(delay)
        } else {
            delay
        }
    }
}

/// Determine whether an error is a rate-limit rejection.
pub fn is_rate_limited(error: &PipelineError) -> bool {
    matches!(
        error,
        PipelineError::Llm {
            status_code: Some(429),
            ..
        }
    )
}

/// Calculate exponential backoff duration for a given attempt.
///
/// Uses `base_delay * 2^attempt` capped at `max_delay_ms`.
pub fn backoff_duration(attempt: u32, base_delay_ms: u64, max_delay_ms: u64) -> Duration {
    let delay = base_delay_ms.saturating_mul(2u64.saturating_pow(attempt));
    Duration::from_millis(delay.min(max_delay_ms))
}

/// Pick a uniformly random duration in `[0, delay]`.
fn full_jitter(delay: Duration) -> Duration {
    let max_ms = delay.as_millis() as u64;
    Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
}
