//! Summarization prompt template.

/// Instruction prefix for every summarization call. Kept as a single
/// constant so the template stays deterministic and testable.
const SUMMARY_INSTRUCTION: &str = "Summarize the following messages in 2-3 sentences. \
    Capture the main topics discussed and any decisions or action items. \
    Output only the summary.";

/// Renders the sanitized transcript into the instruction prompt sent to
/// the provider. The transcript is embedded verbatim after the
/// instruction.
#[must_use]
pub fn build_summarization_prompt(sanitized_text: &str) -> String {
    format!("{SUMMARY_INSTRUCTION}\n\n{sanitized_text}")
}
