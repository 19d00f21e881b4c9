//! Fixed allow-list of provider models the service may invoke.

/// Models the service is permitted to call, in preference order.
const SUPPORTED_MODELS: &[&str] = &["gpt-4o-mini", "gpt-4o", "gpt-4-turbo", "gpt-3.5-turbo"];

/// All supported model identifiers.
#[must_use]
pub const fn supported_models() -> &'static [&'static str] {
    SUPPORTED_MODELS
}

/// The model used when configuration does not name one.
#[must_use]
pub const fn default_model() -> &'static str {
    SUPPORTED_MODELS[0]
}

/// Returns `true` iff `model` exactly matches an allow-listed identifier.
#[must_use]
pub fn is_valid_model(model: &str) -> bool {
    !model.is_empty() && SUPPORTED_MODELS.contains(&model)
}
