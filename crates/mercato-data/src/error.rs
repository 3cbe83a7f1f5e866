//! # Data Error Types
//!
//! Error types for loading snapshots from a catalog source.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DataError (this module) ← Adds file / payload context                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SnapshotError (mercato-core) ← Controller keeps last-good data        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Transient "Could not load ..." notice                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A single malformed record is not an error at this level. It is skipped
//! during normalization and logged.

use mercato_core::{SnapshotError, SnapshotKind};
use thiserror::Error;

/// Snapshot loading errors.
#[derive(Debug, Error)]
pub enum DataError {
    /// The snapshot's backing file or endpoint does not exist.
    #[error("{kind} source not found: {location}")]
    NotFound { kind: SnapshotKind, location: String },

    /// Reading the source failed.
    ///
    /// ## When This Occurs
    /// - File permissions issue
    /// - Directory removed while loading
    #[error("Failed to read {location}: {message}")]
    Io { location: String, message: String },

    /// The payload is not JSON, or not a record list.
    ///
    /// ## When This Occurs
    /// - Truncated export
    /// - Envelope without a `data` array
    #[error("Malformed {kind} payload: {reason}")]
    MalformedPayload { kind: SnapshotKind, reason: String },

    /// The source is configured to be unavailable (static source, tests).
    #[error("{0} unavailable")]
    Unavailable(SnapshotKind),
}

impl DataError {
    /// Creates a MalformedPayload error.
    pub fn malformed(kind: SnapshotKind, reason: impl Into<String>) -> Self {
        DataError::MalformedPayload {
            kind,
            reason: reason.into(),
        }
    }

    /// Converts into the controller's failure token for `kind`.
    pub fn into_snapshot_error(self, kind: SnapshotKind) -> SnapshotError {
        SnapshotError::new(kind, self.to_string())
    }
}

/// Result type for data operations.
pub type DataResult<T> = Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DataError::malformed(SnapshotKind::Orders, "expected an array");
        assert_eq!(err.to_string(), "Malformed orders payload: expected an array");

        let err = DataError::Unavailable(SnapshotKind::VariantTypes);
        assert_eq!(err.to_string(), "variant types unavailable");
    }

    #[test]
    fn test_into_snapshot_error() {
        let err = DataError::NotFound {
            kind: SnapshotKind::Products,
            location: "/tmp/x/products.json".to_string(),
        };
        let snapshot = err.into_snapshot_error(SnapshotKind::Products);
        assert_eq!(snapshot.kind, SnapshotKind::Products);
        assert_eq!(
            snapshot.to_string(),
            "Could not load products: products source not found: /tmp/x/products.json"
        );
    }
}
