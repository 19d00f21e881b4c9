//! Provider-facing functionality: prompt assembly and the LLM API client.

pub mod client;
pub mod prompt_builder;

pub use client::{CompletionClient, OpenAiClient};
pub use prompt_builder::build_summarization_prompt;
