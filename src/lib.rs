/// Recap - a privacy-preserving summarization core for chat conversations.
///
/// This crate turns a raw message window into a cached, PII-sanitized,
/// retried LLM call and back into a result. The HTTP surface, persistence,
/// and auth live outside; this is the embeddable core those layers call.
///
/// # Architecture
///
/// The system uses:
/// - A deterministic cache key over message identities so repeated
///   requests skip the provider entirely
/// - Regex-based anonymization with per-call pseudonyms before any text
///   leaves the process
/// - Classification-driven retries with exponential backoff and jitter
/// - Tokio for async runtime, with caller cancellation honored at every
///   blocking point
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tokio_util::sync::CancellationToken;
/// use recap::ai::OpenAiClient;
/// use recap::cache::InMemoryCache;
/// use recap::core::config::AppConfig;
/// use recap::core::models::SummarizeRequest;
/// use recap::orchestrator::Summarizer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     recap::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let provider = Arc::new(OpenAiClient::new(
///         config.openai_api_key.clone(),
///         config.openai_org_id.clone(),
///         config.provider_timeout,
///     )?);
///     let cache = Arc::new(InMemoryCache::new());
///     let summarizer = Summarizer::new(provider, cache, config.summarizer_config());
///
///     let request: SummarizeRequest = serde_json::from_str("...")?;
///     let result = summarizer
///         .summarize(&request, &CancellationToken::new())
///         .await?;
///     println!("{}", result.summary_text);
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod anonymize;
pub mod cache;
pub mod cache_key;
pub mod core;
pub mod errors;
pub mod orchestrator;
pub mod registry;
pub mod retry;
pub mod window;

/// Configure structured logging with JSON output.
///
/// Sets up tracing-subscriber with a JSON formatter and an environment
/// filter (`RUST_LOG`). Call once at process start.
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;

    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
