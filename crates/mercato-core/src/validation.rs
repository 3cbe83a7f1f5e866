//! # Validation Module
//!
//! Checks for text that arrives from the UI or from configuration before it
//! reaches the dashboard state.
//!
//! ## Usage
//! ```rust
//! use mercato_core::validation::validate_search_query;
//!
//! let query = validate_search_query("  shirt ", 100).unwrap();
//! assert_eq!(query, "shirt");
//! ```

use crate::error::ValidationError;
use crate::{MAX_RECORD_ID_CHARS, MAX_SEARCH_QUERY_CHARS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an opaque record id (product, order, variant).
///
/// Returns the trimmed id.
pub fn validate_record_id(field: &str, id: &str) -> ValidationResult<String> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    if trimmed.chars().count() > MAX_RECORD_ID_CHARS {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_RECORD_ID_CHARS,
        });
    }
    if trimmed.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "contains control characters".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Validates search box input. Empty is fine and means "no query".
///
/// `max_chars` is capped at [`MAX_SEARCH_QUERY_CHARS`] when zero is passed.
pub fn validate_search_query(query: &str, max_chars: usize) -> ValidationResult<String> {
    let max = if max_chars == 0 {
        MAX_SEARCH_QUERY_CHARS
    } else {
        max_chars
    };
    let trimmed = query.trim();
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max,
        });
    }
    Ok(trimmed.to_string())
}

/// Validates a `#rrggbb` chart color.
pub fn validate_hex_color(field: &str, value: &str) -> ValidationResult<()> {
    let digits = value.strip_prefix('#').ok_or_else(|| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must start with '#'".to_string(),
    })?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("expected #rrggbb, got '{}'", value),
        });
    }
    Ok(())
}
