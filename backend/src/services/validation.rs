//! Field checks shared by the create/update handlers.

use crate::error::{AppError, AppResult};
use regex::Regex;

/// Returns the trimmed value, or a validation error naming the field.
pub(crate) fn required(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Trims and lowercases an email address, rejecting anything not shaped like
/// `local@domain.tld`.
pub(crate) fn email(value: &str) -> AppResult<String> {
    let email = required("Email", value)?.to_lowercase();
    let re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .map_err(|e| AppError::Internal(format!("Regex error: {}", e)))?;
    if !re.is_match(&email) {
        return Err(AppError::validation(format!("'{}' is not a valid email", email)));
    }
    Ok(email)
}

/// Student identifiers are non-empty and ASCII alphanumeric.
pub(crate) fn student_id(value: &str) -> AppResult<String> {
    let id = required("Student ID", value)?;
    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::validation(
            "Student ID must contain only letters and digits",
        ));
    }
    Ok(id)
}

pub(crate) fn non_negative(field: &str, value: f64) -> AppResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!(
            "{} must be a non-negative amount",
            field
        )));
    }
    Ok(value)
}

/// Empty optional text collapses to `None`.
pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
