//! Summarization orchestration: cache lookup, sanitization, prompt
//! assembly, the retrying provider call, and the cache write-back.
//!
//! One call runs strictly through these stages; there is no shared
//! mutable state across concurrent requests beyond the injected cache and
//! provider clients, which are read-only after construction.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::ai::client::CompletionClient;
use crate::ai::prompt_builder::build_summarization_prompt;
use crate::anonymize::sanitize_transcript;
use crate::cache::SummaryCache;
use crate::cache_key::build_key;
use crate::core::config::SummarizerConfig;
use crate::core::models::{SummarizeRequest, SummarizeResult};
use crate::errors::SummarizeError;
use crate::registry;
use crate::retry::{ErrorClass, classify, jittered_delay};
use crate::window::last_n;

/// Ties the summarization components together. Holds no long-lived
/// mutable state; safe to share across request tasks.
pub struct Summarizer {
    provider: Arc<dyn CompletionClient>,
    cache: Arc<dyn SummaryCache>,
    config: SummarizerConfig,
}

impl Summarizer {
    #[must_use]
    pub fn new(
        provider: Arc<dyn CompletionClient>,
        cache: Arc<dyn SummaryCache>,
        config: SummarizerConfig,
    ) -> Self {
        Self {
            provider,
            cache,
            config,
        }
    }

    /// Produces a summary for `request`, consulting the cache first and
    /// retrying transient provider failures with backoff.
    ///
    /// Every blocking point (cache get, provider call, inter-retry sleep)
    /// races `cancel`; a cancelled token short-circuits to
    /// [`SummarizeError::Cancelled`] without starting further attempts.
    ///
    /// # Errors
    ///
    /// See [`SummarizeError`] for the full taxonomy. Validation and
    /// sanitization failures are returned before any provider call; cache
    /// failures are logged and never surfaced.
    pub async fn summarize(
        &self,
        request: &SummarizeRequest,
        cancel: &CancellationToken,
    ) -> Result<SummarizeResult, SummarizeError> {
        self.validate(request)?;

        let key = build_key(request.conversation_id, &request.messages, request.limit);

        if cancel.is_cancelled() {
            return Err(SummarizeError::Cancelled);
        }

        // Cache errors are a soft miss; the request must never block on
        // cache availability.
        match with_cancel(cancel, self.cache.get(&key)).await? {
            Ok(Some(hit)) => {
                debug!(conversation_id = %request.conversation_id, "Summary cache hit");
                return Ok(hit);
            }
            Ok(None) => {}
            Err(e) => warn!("Cache read failed, treating as miss: {e}"),
        }

        let limit = request.limit.unwrap_or(self.config.default_message_limit);
        let windowed = last_n(&request.messages, limit);

        // The reverse mapping stays on this stack frame and is dropped
        // with it; it must never reach a log line or the cache.
        let (sanitized, _mapping) = sanitize_transcript(windowed)?;
        let prompt = build_summarization_prompt(&sanitized);

        let summary_text = self.call_with_retries(&prompt, cancel).await?;

        let result = SummarizeResult {
            summary_text,
            produced_at: Utc::now(),
        };

        // Fail-open: neither a write failure nor a caller that gave up
        // mid-write changes what the caller gets.
        match with_cancel(cancel, self.cache.set(&key, &result, self.config.cache_ttl)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Cache write failed, returning uncached result: {e}"),
            Err(_) => warn!("Cache write abandoned on cancellation, returning uncached result"),
        }

        Ok(result)
    }

    /// Single liveness probe against the provider, raced with `cancel`.
    ///
    /// # Errors
    ///
    /// Returns the provider's error on failure, or
    /// [`SummarizeError::Cancelled`] when the caller gave up first.
    pub async fn health(&self, cancel: &CancellationToken) -> Result<(), SummarizeError> {
        with_cancel(cancel, self.provider.health()).await?
    }

    fn validate(&self, request: &SummarizeRequest) -> Result<(), SummarizeError> {
        if request.messages.is_empty() {
            return Err(SummarizeError::InvalidRequest(
                "messages must not be empty".to_string(),
            ));
        }
        if request.limit == Some(0) {
            return Err(SummarizeError::InvalidRequest(
                "limit must be at least 1".to_string(),
            ));
        }
        if !registry::is_valid_model(&self.config.model) {
            return Err(SummarizeError::InvalidRequest(format!(
                "unsupported model: {}",
                self.config.model
            )));
        }
        Ok(())
    }

    async fn call_with_retries(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, SummarizeError> {
        let mut attempt: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(SummarizeError::Cancelled);
            }

            let call = self.provider.complete(
                prompt,
                &self.config.model,
                self.config.max_tokens,
                self.config.temperature,
            );

            let err = match with_cancel(cancel, call).await? {
                Ok(text) => {
                    info!(attempt, "Provider call succeeded");
                    return Ok(text);
                }
                Err(err) => err,
            };

            match classify(&err) {
                ErrorClass::NotRetryable => {
                    warn!(attempt, "Provider call failed with fatal error: {err}");
                    return Err(err);
                }
                ErrorClass::Retryable if attempt >= self.config.max_retries => {
                    warn!(attempt, "Provider retry budget exhausted: {err}");
                    return Err(SummarizeError::RetriesExhausted {
                        attempts: attempt + 1,
                        last: err.to_string(),
                    });
                }
                ErrorClass::Retryable => {
                    let delay = jittered_delay(attempt, &self.config.retry);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Provider call failed, retrying: {err}"
                    );
                    tokio::select! {
                        biased;
                        () = cancel.cancelled() => return Err(SummarizeError::Cancelled),
                        () = tokio::time::sleep(delay) => {}
                    }
                    attempt += 1;
                }
            }
        }
    }
}

/// Races `fut` against `cancel`. Biased so an already-cancelled token
/// wins before `fut` is polled at all.
async fn with_cancel<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = T>,
) -> Result<T, SummarizeError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(SummarizeError::Cancelled),
        out = fut => Ok(out),
    }
}
