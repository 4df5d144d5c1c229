//! Sequential completion client.
//!
//! Sends one request per batch, in order, and retries a batch only when the
//! provider reports rate limiting. Completions are accumulated in batch order
//! so their position still matches the identifier list.

use super::provider::{CompletionProvider, GenerationParams};
use super::retry::{self, RetryPolicy};
use crate::error::PipelineError;
use crate::query::Payload;
use std::time::Duration;

/// Outcome of completing every batch.
#[derive(Debug, Clone, Default)]
pub struct CompletionReport {
    /// Completion texts, flattened in batch order
    pub completions: Vec<String>,
    /// Requests sent successfully (one per batch)
    pub batches: usize,
    /// Retries caused by rate limiting
    pub rate_limited: u32,
    /// Total time slept in backoff
    pub backoff: Duration,
}

/// Drives a [`CompletionProvider`] over batches with rate-limit backoff.
pub struct CompletionClient {
    provider: Box<dyn CompletionProvider>,
    params: GenerationParams,
    retry: RetryPolicy,
}

impl CompletionClient {
    pub fn new(
        provider: Box<dyn CompletionProvider>,
        params: GenerationParams,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            provider,
            params,
            retry,
        }
    }

    /// Complete every batch in order.
    ///
    /// Calls `on_batch(done, total)` after each batch. The first error that is
    /// not a rate limit (or a rate limit past the retry ceiling) aborts the run.
    pub async fn complete_all<F>(
        &self,
        batches: &[Vec<Payload>],
        mut on_batch: F,
    ) -> Result<CompletionReport, PipelineError>
    where
        F: FnMut(usize, usize),
    {
        let mut report = CompletionReport::default();
        tracing::info!(
            "Requesting completions for {} batch(es) from {} ({})",
            batches.len(),
            self.provider.name(),
            self.params.model
        );

        for (i, batch) in batches.iter().enumerate() {
            let texts = self.complete_with_backoff(i, batch, &mut report).await?;
            if texts.len() != batch.len() {
                tracing::warn!(
                    "Batch {i} returned {} completion(s) for {} payload(s)",
                    texts.len(),
                    batch.len()
                );
            }
            report.completions.extend(texts);
            report.batches += 1;
            on_batch(i + 1, batches.len());
        }

        Ok(report)
    }

    /// Send one batch, retrying on rate limits with exponential backoff.
    async fn complete_with_backoff(
        &self,
        index: usize,
        batch: &[Payload],
        report: &mut CompletionReport,
    ) -> Result<Vec<String>, PipelineError> {
        let mut retries = 0u32;
        loop {
            match self.provider.complete(batch, &self.params).await {
                Ok(response) => {
                    tracing::debug!(
                        "Batch {index}: {} completion(s) from {} in {}ms (tokens: {:?})",
                        response.texts.len(),
                        response.model,
                        response.latency_ms,
                        response.tokens_used
                    );
                    return Ok(response.texts);
                }
                Err(e) if retry::is_rate_limited(&e) && self.retry.allows(retries) => {
                    let delay = self.retry.delay(retries);
                    retries += 1;
                    tracing::warn!("Batch {index} rate limited, retry {retries} after {delay:?}");
                    report.rate_limited += 1;
                    report.backoff += delay;
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::error!("Batch {index} failed: {e}");
                    return Err(e);
                }
            }
        }
    }
}
