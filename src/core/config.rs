use std::env;
use std::time::Duration;

use crate::registry;
use crate::retry::RetryConfig;

/// Process-wide configuration, loaded once at startup and treated as
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub provider_timeout: Duration,
    pub cache_ttl: Duration,
    pub default_message_limit: usize,
    pub retry: RetryConfig,
    pub max_retries: u32,
}

/// Orchestrator-facing subset of [`AppConfig`].
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub cache_ttl: Duration,
    pub default_message_limit: usize,
    pub retry: RetryConfig,
    pub max_retries: u32,
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| format!("{name}: invalid value {raw:?}")),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let retry = RetryConfig {
            base_delay: Duration::from_millis(parse_var("RETRY_BASE_DELAY_MS", 100u64)?),
            max_delay: Duration::from_millis(parse_var("RETRY_MAX_DELAY_MS", 10_000u64)?),
            backoff_factor: parse_var("RETRY_BACKOFF_FACTOR", 2.0f64)?,
        };

        if retry.base_delay > retry.max_delay {
            return Err("RETRY_BASE_DELAY_MS must not exceed RETRY_MAX_DELAY_MS".to_string());
        }
        if retry.backoff_factor < 1.0 {
            return Err("RETRY_BACKOFF_FACTOR must be at least 1".to_string());
        }

        let model = env::var("SUMMARY_MODEL")
            .unwrap_or_else(|_| registry::default_model().to_string());
        if !registry::is_valid_model(&model) {
            return Err(format!("SUMMARY_MODEL: unsupported model {model:?}"));
        }

        let default_message_limit = parse_var("DEFAULT_MESSAGE_LIMIT", 50usize)?;
        if default_message_limit == 0 {
            return Err("DEFAULT_MESSAGE_LIMIT must be at least 1".to_string());
        }

        Ok(Self {
            openai_api_key: env::var("OPENAI_API_KEY")
                .map_err(|e| format!("OPENAI_API_KEY: {e}"))?,
            openai_org_id: env::var("OPENAI_ORG_ID").ok(),
            model,
            max_tokens: parse_var("SUMMARY_MAX_TOKENS", 256u32)?,
            temperature: parse_var("SUMMARY_TEMPERATURE", 0.3f32)?,
            provider_timeout: Duration::from_secs(parse_var("PROVIDER_TIMEOUT_SECS", 30u64)?),
            cache_ttl: Duration::from_secs(parse_var("SUMMARY_CACHE_TTL_SECS", 3600u64)?),
            default_message_limit,
            retry,
            max_retries: parse_var("RETRY_MAX_RETRIES", 3u32)?,
        })
    }

    #[must_use]
    pub fn summarizer_config(&self) -> SummarizerConfig {
        SummarizerConfig {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            cache_ttl: self.cache_ttl,
            default_message_limit: self.default_message_limit,
            retry: self.retry.clone(),
            max_retries: self.max_retries,
        }
    }
}
