//! Calendar event kinds.

use crate::error::CoreError;

pub const KIND_REMINDER: &str = "reminder";
pub const KIND_DEADLINE: &str = "deadline";
pub const KIND_MEETING: &str = "meeting";

const VALID_KINDS: &[&str] = &[KIND_REMINDER, KIND_DEADLINE, KIND_MEETING];

/// Validate an event `type`.
pub fn validate_kind(kind: &str) -> Result<(), CoreError> {
    if VALID_KINDS.contains(&kind) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid event type '{kind}'. Must be one of: {}",
            VALID_KINDS.join(", ")
        )))
    }
}

/// Validate an event title.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    crate::validation::require_text("title", title)?;
    crate::validation::max_length("title", title, crate::validation::NAME_MAX_LEN)
}
