//! Store- and persistence-level failure kinds.

use std::path::PathBuf;

use thiserror::Error;

use crate::entity::ItemId;

/// Errors raised by [`crate::KeyedStore`] operations.
///
/// The set is closed: every store failure is one of these three kinds.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An entity with this id already exists.
    #[error("Duplicate identity: {0}")]
    DuplicateIdentity(ItemId),

    /// No entity with this id exists.
    #[error("Entity not found: {0}")]
    NotFound(ItemId),

    /// A mutation was rejected before touching the store.
    #[error("Invalid value: {reason}")]
    InvalidValue {
        reason: String,
    },
}

impl StoreError {
    pub(crate) fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Returns true for [`StoreError::DuplicateIdentity`].
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateIdentity(_))
    }

    /// Returns true for [`StoreError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true for [`StoreError::InvalidValue`].
    #[must_use]
    pub const fn is_invalid_value(&self) -> bool {
        matches!(self, Self::InvalidValue { .. })
    }
}

/// Errors raised while saving or loading a store document.
///
/// A missing document on load is not an error; see
/// [`crate::storage::LoadOutcome::Absent`].
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The document could not be encoded, or its content does not describe a
    /// valid store.
    #[error("Serialization error for {}: {message}", .path.display())]
    Serialization {
        path: PathBuf,
        message: String,
    },

    /// The underlying file operation failed.
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document exceeds the configured size limit.
    #[error("Document {} is {size} bytes, exceeds maximum {max}", .path.display())]
    DocumentTooLarge {
        path: PathBuf,
        size: u64,
        max: u64,
    },

    /// The persistence configuration is unusable.
    #[error("Invalid persistence config: {message}")]
    InvalidConfig {
        message: String,
    },
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn serialization(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Serialization {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_kinds_are_distinguishable() {
        let dup = StoreError::DuplicateIdentity(ItemId::new(1));
        let missing = StoreError::NotFound(ItemId::new(2));
        let invalid = StoreError::invalid_value("quantity cannot be negative");

        assert!(dup.is_duplicate() && !dup.is_not_found() && !dup.is_invalid_value());
        assert!(missing.is_not_found() && !missing.is_duplicate());
        assert!(invalid.is_invalid_value() && !invalid.is_not_found());
    }

    #[test]
    fn test_store_error_display() {
        assert_eq!(
            StoreError::DuplicateIdentity(ItemId::new(1)).to_string(),
            "Duplicate identity: 1"
        );
        assert_eq!(
            StoreError::NotFound(ItemId::new(99)).to_string(),
            "Entity not found: 99"
        );
        assert!(StoreError::invalid_value("negative")
            .to_string()
            .contains("negative"));
    }

    #[test]
    fn test_persistence_error_display_names_path() {
        let err = PersistenceError::serialization("data/inventory.json", "expected `,`");
        let msg = err.to_string();
        assert!(msg.contains("data/inventory.json"));
        assert!(msg.contains("expected `,`"));

        let err = PersistenceError::DocumentTooLarge {
            path: "big.json".into(),
            size: 2048,
            max: 1024,
        };
        assert!(err.to_string().contains("exceeds maximum 1024"));
    }
}
