//! Deterministic cache-key derivation for summarize requests.
//!
//! The key folds in each message's id and creation timestamp rather than
//! its free-text content, so computation stays O(n) in message count
//! without re-hashing full bodies. Message edits are out of scope: the
//! calling conversation history treats messages as immutable once created.

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::core::models::Message;

/// Key namespace, bumped if the derivation ever changes shape.
const KEY_PREFIX: &str = "summary:v1";

/// Builds the cache key for `(conversation_id, messages, limit)`.
///
/// Identical inputs always yield the same key across process restarts,
/// and changing only `limit` changes the key.
#[must_use]
pub fn build_key(conversation_id: Uuid, messages: &[Message], limit: Option<usize>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(conversation_id.as_bytes());

    // Distinguish "no limit" from any numeric limit.
    match limit {
        Some(n) => {
            hasher.update(b"limit:");
            hasher.update(n.to_le_bytes());
        }
        None => hasher.update(b"limit:none"),
    }

    for message in messages {
        hasher.update(message.id.as_bytes());
        hasher.update(message.created_at.timestamp_micros().to_le_bytes());
    }

    format!("{KEY_PREFIX}:{}", hex::encode(hasher.finalize()))
}
