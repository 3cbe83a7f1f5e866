//! # API Error Type
//!
//! Unified error type for console commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Mercato Console                        │
//! │                                                                         │
//! │  Command Function  ── Result<T, ApiError>                              │
//! │         │                                                               │
//! │         ├── unknown bucket / legend key ── CoreError ──────┐           │
//! │         ├── search too long, bad id ─── ValidationError ───┤           │
//! │         ├── data dir unreadable ──────── DataError ────────┼─► ApiError│
//! │         └── broken console.toml ──────── ConfigError ──────┘           │
//! │                                                                         │
//! │  Snapshot fetch failures never reach this type during a refresh.       │
//! │  The controller keeps the last good data and shows a notice instead.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use mercato_core::{CoreError, ValidationError};
use mercato_data::DataError;

use crate::state::ConfigError;

/// API error returned from console commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "search must be at most 100 characters"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record not found in the current snapshot
    NotFound,

    /// Input validation failed
    ValidationError,

    /// A snapshot could not be loaded
    DataUnavailable,

    /// Configuration could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownStockBucket(_)
            | CoreError::UnknownOrderBucket(_)
            | CoreError::UnknownLegendKey(_) => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts data errors to API errors.
impl From<DataError> for ApiError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Io { .. } => {
                tracing::error!(error = %err, "Data source read failed");
                ApiError::new(ErrorCode::DataUnavailable, "Data source could not be read")
            }
            other => ApiError::new(ErrorCode::DataUnavailable, other.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(format!("Failed to serialize response: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use mercato_core::SnapshotKind;

    #[test]
    fn test_core_error_is_validation() {
        let err: ApiError = CoreError::UnknownStockBucket("low".to_string()).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("low"));
    }

    #[test]
    fn test_data_error_mapping() {
        let err: ApiError = DataError::Unavailable(SnapshotKind::Orders).into();
        assert_eq!(err.code, ErrorCode::DataUnavailable);
        assert_eq!(err.message, "orders unavailable");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("Product", "p1");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: p1");
    }
}
