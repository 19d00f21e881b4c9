//! Retry policy: pure error classification and backoff computation.
//!
//! These functions are deliberately free of I/O so they can be unit-tested
//! without timers or network calls; the orchestrator composes them with a
//! cancellation-aware sleep.

use std::time::Duration;

use rand::Rng;

use crate::errors::SummarizeError;

/// Whether re-attempting a failed operation could plausibly succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Retryable,
    NotRetryable,
}

/// Backoff shape for transient provider failures.
///
/// Invariants (enforced at config load): `base_delay <= max_delay` and
/// `backoff_factor >= 1`.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
        }
    }
}

/// Substrings marking an error as fatal. Checked before the retryable
/// table: an invalid request stays invalid no matter how often we retry.
const FATAL_MARKERS: &[&str] = &[
    "authentication",
    "unauthorized",
    "invalid api key",
    "invalid request",
    "status 400",
    "status 401",
    "status 403",
];

/// Substrings marking an error as transient. Unrecognized errors default
/// to not-retryable rather than looping on unknown conditions.
const RETRYABLE_MARKERS: &[&str] = &[
    "rate limit",
    "too many requests",
    "server error",
    "network",
    "connection",
    "timed out",
    "429",
    "502",
    "503",
    "504",
    "bad gateway",
    "service unavailable",
    "gateway timeout",
];

/// Classifies `err` as retryable or fatal.
///
/// Cancellation is never retryable (the caller already gave up), and
/// validation/sanitization failures are terminal by construction. Provider
/// and transport errors are classified by message content.
#[must_use]
pub fn classify(err: &SummarizeError) -> ErrorClass {
    match err {
        SummarizeError::Provider(msg) | SummarizeError::Http(msg) => classify_message(msg),
        SummarizeError::Cancelled
        | SummarizeError::InvalidRequest(_)
        | SummarizeError::Anonymization(_)
        | SummarizeError::RetriesExhausted { .. } => ErrorClass::NotRetryable,
    }
}

fn classify_message(msg: &str) -> ErrorClass {
    let lowered = msg.to_ascii_lowercase();

    if FATAL_MARKERS.iter().any(|m| lowered.contains(m)) {
        return ErrorClass::NotRetryable;
    }
    if RETRYABLE_MARKERS.iter().any(|m| lowered.contains(m)) {
        return ErrorClass::Retryable;
    }

    ErrorClass::NotRetryable
}

/// Computes the backoff delay for a zero-indexed `attempt`:
/// `base_delay * backoff_factor^attempt`, clamped to `max_delay`.
///
/// Monotonically non-decreasing in `attempt` and never exceeds
/// `max_delay`, no matter how large `attempt` grows.
#[must_use]
pub fn compute_delay(attempt: u32, config: &RetryConfig) -> Duration {
    let factor = config.backoff_factor.max(1.0);
    // Exponent capped well past the point where the clamp takes over.
    let scaled = config.base_delay.as_secs_f64() * factor.powi(attempt.min(128) as i32);

    if !scaled.is_finite() || scaled >= config.max_delay.as_secs_f64() {
        return config.max_delay;
    }
    Duration::from_secs_f64(scaled).min(config.max_delay)
}

/// [`compute_delay`] with bounded jitter in `[delay, 2 * delay)` to
/// desynchronize concurrent retries, still respecting the `max_delay`
/// ceiling.
#[must_use]
pub fn jittered_delay(attempt: u32, config: &RetryConfig) -> Duration {
    let base = compute_delay(attempt, config);
    if base >= config.max_delay {
        return config.max_delay;
    }

    let spread: f64 = rand::rng().random_range(1.0..2.0);
    Duration::from_secs_f64(base.as_secs_f64() * spread).min(config.max_delay)
}
