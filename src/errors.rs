use thiserror::Error;

/// Errors surfaced by the summarization core.
///
/// `Provider` and `Http` carry the raw upstream message so the retry
/// classifier can inspect it for transient conditions (rate limits,
/// 5xx statuses, connection failures).
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("Invalid summarize request: {0}")]
    InvalidRequest(String),

    #[error("Failed to anonymize conversation: {0}")]
    Anonymization(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Failed to send HTTP request: {0}")]
    Http(String),

    #[error("Provider call failed after {attempts} attempts, retries exhausted: {last}")]
    RetriesExhausted { attempts: u32, last: String },

    #[error("Request cancelled by caller")]
    Cancelled,
}

impl From<reqwest::Error> for SummarizeError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            SummarizeError::Http(format!("network connection timed out: {error}"))
        } else if error.is_connect() {
            SummarizeError::Http(format!("network connection failed: {error}"))
        } else {
            SummarizeError::Http(error.to_string())
        }
    }
}
