use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label used when rendering a transcript line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single chat message. Owned by the calling conversation history;
/// immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// An already-deserialized summarization request. The HTTP layer owns the
/// wire format; this core only sees the parsed shape.
///
/// Invariants (checked by the orchestrator): `messages` is non-empty and
/// chronologically ordered; `limit`, when present, is at least 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub conversation_id: Uuid,
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    pub user_id: Uuid,
}

/// The outcome of one successful provider call. Immutable after creation;
/// also the value stored in the summary cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeResult {
    pub summary_text: String,
    pub produced_at: DateTime<Utc>,
}
