//! # Error Types
//!
//! Domain-specific error types for mercato-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mercato-core errors (this file)                                       │
//! │  ├── CoreError        - Unknown keys coming from the UI                │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── SnapshotError    - "snapshot unavailable" token                   │
//! │                                                                         │
//! │  mercato-data errors (separate crate)                                  │
//! │  └── DataError        - Source read / payload failures                 │
//! │                                                                         │
//! │  Console errors (in app)                                               │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: DataError → SnapshotError → Controller (never fatal)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in the derivations returns these errors. They only appear where
//! text from the outside world is parsed into a typed key.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised when parsing UI-provided keys into typed values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Stock bucket key is not one of all/out/limited/other.
    #[error("Unknown stock bucket: '{0}'. Valid options: all, out, limited, other")]
    UnknownStockBucket(String),

    /// Order bucket key is not one of the five buckets.
    #[error(
        "Unknown order bucket: '{0}'. Valid options: pending, processed, cancelled, shipped, delivered"
    )]
    UnknownOrderBucket(String),

    /// Legend key is neither `all` nor an order bucket.
    #[error(
        "Unknown legend key: '{0}'. Valid options: all, pending, processed, cancelled, shipped, delivered"
    )]
    UnknownLegendKey(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., not a hex color).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Snapshot Error
// =============================================================================

/// Which external snapshot a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotKind {
    Products,
    Orders,
    VariantTypes,
    Variants,
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotKind::Products => write!(f, "products"),
            SnapshotKind::Orders => write!(f, "orders"),
            SnapshotKind::VariantTypes => write!(f, "variant types"),
            SnapshotKind::Variants => write!(f, "variants"),
        }
    }
}

/// A failed snapshot fetch, as delivered to the controller.
///
/// The controller keeps the last good snapshot and turns this into a
/// transient notice. It is never propagated further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not load {kind}: {reason}")]
pub struct SnapshotError {
    pub kind: SnapshotKind,
    pub reason: String,
}

impl SnapshotError {
    /// Creates a snapshot error for the given kind.
    pub fn new(kind: SnapshotKind, reason: impl Into<String>) -> Self {
        SnapshotError {
            kind,
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
