//! Error types for Stockroom.
//!
//! All errors are strongly typed using thiserror so callers can match on the
//! exact failure kind: continue a batch on a missing id, abort on a rejected
//! value.

use thiserror::Error;

use crate::grading::GradingError;
use crate::storage::{PersistenceError, StoreError};

/// Validation errors raised while constructing records at the boundary.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required text field is blank.
    #[error("Required field '{field}' is empty")]
    EmptyField {
        field: String,
    },

    /// An identifier is reserved or malformed.
    #[error("Invalid identifier: {value}")]
    InvalidIdentifier {
        value: String,
    },

    /// A numeric field is outside its allowed range.
    #[error("Field '{field}' value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Top-level error type for Stockroom.
#[derive(Debug, Error)]
pub enum StockroomError {
    /// Record construction failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A keyed-store operation was rejected.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Saving or loading a document failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Score import or report writing failed.
    #[error("Grading error: {0}")]
    Grading(#[from] GradingError),
}

impl StockroomError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a keyed-store error.
    #[must_use]
    pub const fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Returns true if this is a persistence error.
    #[must_use]
    pub const fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }

    /// Returns true if this is a grading error.
    #[must_use]
    pub const fn is_grading(&self) -> bool {
        matches!(self, Self::Grading(_))
    }

    /// Returns true if retrying the same call could succeed.
    ///
    /// Only I/O failures qualify. Nothing in this crate retries on its own.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Persistence(e) => matches!(e, PersistenceError::Io { .. }),
            Self::Grading(e) => matches!(e, GradingError::Io { .. }),
            Self::Validation(_) | Self::Store(_) => false,
        }
    }
}

/// Result type alias for Stockroom operations.
pub type StockroomResult<T> = Result<T, StockroomError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ItemId;

    #[test]
    fn test_validation_error_empty_field() {
        let err = ValidationError::EmptyField {
            field: "name".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("name"));
        assert!(msg.contains("empty"));
    }

    #[test]
    fn test_validation_error_out_of_range() {
        let err = ValidationError::OutOfRange {
            field: "score".to_string(),
            value: 120,
            min: 0,
            max: 100,
        };
        let msg = format!("{err}");
        assert!(msg.contains("120"));
        assert!(msg.contains("[0, 100]"));
    }

    #[test]
    fn test_stockroom_error_from_store() {
        let err: StockroomError = StoreError::NotFound(ItemId::new(99)).into();
        assert!(err.is_store());
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn test_stockroom_error_from_validation() {
        let err: StockroomError = ValidationError::InvalidIdentifier {
            value: "0".to_string(),
        }
        .into();
        assert!(err.is_validation());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_stockroom_error_io_is_retryable() {
        let err: StockroomError = PersistenceError::Io {
            path: "inventory.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert!(err.is_persistence());
        assert!(err.is_retryable());

        let err: StockroomError = PersistenceError::Serialization {
            path: "inventory.json".into(),
            message: "expected value".to_string(),
        }
        .into();
        assert!(!err.is_retryable());
    }
}
