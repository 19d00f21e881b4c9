//! PII anonymization applied to transcripts before external transmission.
//!
//! Identifying fragments are replaced with stable per-call pseudonyms so
//! the provider sees consistent entities ("PERSON_1 asked PERSON_2")
//! without ever seeing the originals. The reverse mapping is returned for
//! potential rehydration of the result and must never be logged, cached,
//! or persisted.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::models::Message;
use crate::errors::SummarizeError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

static IPV4_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").expect("valid ipv4 regex"));

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?\d{1,3}[-.\s]?\(?\d{2,4}\)?[-.\s]?\d{3,4}[-.\s]?\d{3,4}")
        .expect("valid phone regex")
});

static HANDLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@[A-Za-z0-9_.\-]+").expect("valid handle regex"));

// Heuristic: two adjacent capitalized words. Overcautious redaction of a
// non-name pair is preferable to leaking a real one.
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+ [A-Z][a-z]+\b").expect("valid name regex"));

/// Redaction passes in application order. Emails run before handles so the
/// `@domain` tail of an address is never matched as a standalone handle.
static CATEGORIES: &[(&str, &Lazy<Regex>)] = &[
    ("EMAIL", &EMAIL_RE),
    ("IP", &IPV4_RE),
    ("PHONE", &PHONE_RE),
    ("HANDLE", &HANDLE_RE),
    ("PERSON", &NAME_RE),
];

/// Renders `messages` as a `role: content` transcript and replaces PII
/// with pseudonyms. Returns the sanitized text and the pseudonym → original
/// mapping, scoped strictly to this call.
///
/// # Errors
///
/// Returns [`SummarizeError::Anonymization`] when the transcript is empty
/// after control-character stripping, since an empty prompt cannot be
/// safely summarized.
pub fn sanitize_transcript(
    messages: &[Message],
) -> Result<(String, HashMap<String, String>), SummarizeError> {
    let stripped: Vec<String> = messages
        .iter()
        .map(|m| strip_control_chars(&m.content))
        .collect();

    if stripped.iter().all(|content| content.trim().is_empty()) {
        return Err(SummarizeError::Anonymization(
            "transcript is empty after removing control characters".to_string(),
        ));
    }

    let transcript = messages
        .iter()
        .zip(&stripped)
        .map(|(m, content)| format!("{}: {}", m.role.label(), content))
        .collect::<Vec<_>>()
        .join("\n");

    let mut assigned: HashMap<String, String> = HashMap::new();
    let mut mapping: HashMap<String, String> = HashMap::new();
    let mut counters: HashMap<&'static str, usize> = HashMap::new();

    let mut sanitized = transcript;
    for &(label, pattern) in CATEGORIES {
        sanitized = pattern
            .replace_all(&sanitized, |caps: &regex::Captures| {
                let original = caps[0].to_string();
                if let Some(token) = assigned.get(&original) {
                    return token.clone();
                }
                let count = counters.entry(label).or_insert(0);
                *count += 1;
                let token = format!("{label}_{count}");
                assigned.insert(original.clone(), token.clone());
                mapping.insert(token.clone(), original);
                token
            })
            .into_owned();
    }

    Ok((sanitized, mapping))
}

/// Remove control characters while keeping all printable content intact.
fn strip_control_chars(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_control()).collect()
}
