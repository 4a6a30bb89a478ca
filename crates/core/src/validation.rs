//! Field checks shared by the create/update endpoints.

use crate::error::CoreError;

/// `VARCHAR(255)` columns: names, titles, emails.
pub const NAME_MAX_LEN: usize = 255;
/// `VARCHAR(100)` columns: fabric colors.
pub const COLOR_MAX_LEN: usize = 100;
/// `VARCHAR(50)` columns: phone numbers and free-form statuses.
pub const SHORT_TEXT_MAX_LEN: usize = 50;
/// `VARCHAR(10)` columns: size charts.
pub const SIZE_CHART_MAX_LEN: usize = 10;

/// Reject an empty or whitespace-only text field.
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Like [`require_text`], for fields that are only checked when present.
pub fn require_text_if_present(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(value) => require_text(field, value),
        None => Ok(()),
    }
}

/// Reject text longer than `max` characters (the column's `VARCHAR(max)`).
pub fn max_length(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters (got {len})"
        )));
    }
    Ok(())
}

/// Like [`max_length`], for fields that are only checked when present.
pub fn max_length_if_present(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<(), CoreError> {
    match value {
        Some(value) => max_length(field, value, max),
        None => Ok(()),
    }
}
