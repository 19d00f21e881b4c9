//! LLM provider client.
//!
//! Wraps the OpenAI chat-completions API behind the [`CompletionClient`]
//! trait so the orchestrator and its tests never depend on the concrete
//! transport. Upstream statuses are folded into the error message, which
//! is what the retry classifier inspects.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;

use crate::errors::SummarizeError;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODELS_URL: &str = "https://api.openai.com/v1/models";

/// Seam to the external LLM provider.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Requests one completion for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizeError::Http`] on transport failure and
    /// [`SummarizeError::Provider`] when the provider rejects the call or
    /// returns an unusable body.
    async fn complete(
        &self,
        prompt: &str,
        model: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, SummarizeError>;

    /// Issues a single cheap liveness probe against the provider.
    /// Never retries internally.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider is unreachable or unhealthy.
    async fn health(&self) -> Result<(), SummarizeError>;
}

/// OpenAI-backed [`CompletionClient`].
pub struct OpenAiClient {
    api_key: String,
    org_id: Option<String>,
    client: Client,
}

impl OpenAiClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        api_key: String,
        org_id: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SummarizeError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            SummarizeError::Http(format!("Failed to build provider HTTP client: {e}"))
        })?;

        Ok(Self {
            api_key,
            org_id,
            client,
        })
    }

    fn headers(&self) -> Result<reqwest::header::HeaderMap, SummarizeError> {
        let mut headers = reqwest::header::HeaderMap::new();

        let auth_value = format!("Bearer {}", self.api_key)
            .parse()
            .map_err(|e| SummarizeError::Http(format!("Invalid Authorization header: {e}")))?;
        headers.insert("Authorization", auth_value);

        let content_type_value = "application/json"
            .parse()
            .map_err(|e| SummarizeError::Http(format!("Invalid Content-Type header: {e}")))?;
        headers.insert("Content-Type", content_type_value);

        if let Some(org) = &self.org_id {
            let org_value = org.parse().map_err(|e| {
                SummarizeError::Http(format!("Invalid OpenAI-Organization header: {e}"))
            })?;
            headers.insert("OpenAI-Organization", org_value);
        }

        Ok(headers)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        prompt: &str,
        model: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, SummarizeError> {
        info!(model, max_tokens, "Requesting completion from provider");

        let request_body = json!({
            "model": model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": max_tokens,
            "temperature": temperature,
        });

        let response = self
            .client
            .post(COMPLETIONS_URL)
            .headers(self.headers()?)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(SummarizeError::Provider(format!(
                "provider error (status {}): {error_text}",
                status.as_u16()
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SummarizeError::Provider(format!("Failed to parse provider response: {e}"))
        })?;

        extract_completion_text(&response_json).ok_or_else(|| {
            SummarizeError::Provider("No text in provider response".to_string())
        })
    }

    async fn health(&self) -> Result<(), SummarizeError> {
        let response = self
            .client
            .get(MODELS_URL)
            .headers(self.headers()?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SummarizeError::Provider(format!(
                "provider health check failed (status {})",
                status.as_u16()
            )));
        }
        Ok(())
    }
}

/// Pulls the first non-empty message text out of a chat-completions body.
fn extract_completion_text(response_json: &Value) -> Option<String> {
    response_json
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}
