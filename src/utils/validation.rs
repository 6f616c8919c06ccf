//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Validation errors are reported at the boundary of the operation that
//! receives the bad input, never silently coerced.

use std::collections::BTreeMap;

use crate::core::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: restaurant, menu item, service, cuisine
pub const MAX_NAME_LEN: usize = 200;

/// Free-text location strings
pub const MAX_LOCATION_LEN: usize = 500;

/// Rating comments, descriptions
pub const MAX_COMMENT_LEN: usize = 2000;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate menu entries: non-empty item names, finite prices >= 0.
pub fn validate_menu(menu: &BTreeMap<String, f64>) -> Result<(), AppError> {
    for (item, price) in menu {
        validate_required_text(item, "menu item name", MAX_NAME_LEN)?;
        if !price.is_finite() || *price < 0.0 {
            return Err(AppError::validation(format!(
                "menu price for '{item}' must be >= 0, got {price}"
            )));
        }
    }
    Ok(())
}
