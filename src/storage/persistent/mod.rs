//! Whole-document JSON persistence for keyed stores.
//!
//! A store is saved as one JSON array and loaded back the same way:
//! - `save` writes the full content, never a diff
//! - `load` replaces the full content, never merges
//! - a missing document is a benign [`LoadOutcome::Absent`]
//!
//! # Durability
//!
//! With [`PersistenceConfig::atomic_replace`] (the default) the document is
//! written to a temporary sibling and renamed over the target, so a crash
//! mid-write leaves the previous document intact. The directory entry is not
//! fsynced, so the rename itself may be lost on power failure. Without atomic
//! replace the target is truncated first and a crash can corrupt it.

mod codec;
mod writer;

pub use writer::is_temp_file;

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use crate::entity::Entity;
use crate::storage::error::PersistenceError;
use crate::storage::memory::KeyedStore;

use writer::DocumentWriter;

/// Configuration for document persistence.
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// Indent the JSON output.
    pub pretty: bool,
    /// Write to a temporary file and rename it over the target.
    pub atomic_replace: bool,
    /// Whether to fsync the document before `save` returns.
    pub sync_on_write: bool,
    /// Largest document `load` will read (bytes).
    pub max_document_bytes: u64,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            atomic_replace: true,
            sync_on_write: true,
            max_document_bytes: 100 * 1024 * 1024, // 100 MiB
        }
    }
}

impl PersistenceConfig {
    const MIN_DOCUMENT_BYTES: u64 = 1024;

    /// Check the configuration, returning it unchanged when usable.
    ///
    /// # Errors
    /// `InvalidConfig` if `max_document_bytes` is below 1 KiB.
    pub fn validate(self) -> Result<Self, PersistenceError> {
        if self.max_document_bytes < Self::MIN_DOCUMENT_BYTES {
            return Err(PersistenceError::InvalidConfig {
                message: format!(
                    "max_document_bytes must be at least {} bytes (got {})",
                    Self::MIN_DOCUMENT_BYTES,
                    self.max_document_bytes
                ),
            });
        }
        Ok(self)
    }
}

/// Result of a successful [`JsonFileStore::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No document exists at the path; the store was left untouched.
    Absent,
    /// The document was read and replaced the store's content.
    Loaded {
        /// Number of entities now in the store.
        count: usize,
    },
}

impl LoadOutcome {
    /// Returns true if there was no document to load.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Number of loaded entities, or `None` when absent.
    #[must_use]
    pub const fn loaded_count(&self) -> Option<usize> {
        match self {
            Self::Absent => None,
            Self::Loaded { count } => Some(*count),
        }
    }
}

/// Persistence adapter writing keyed stores to JSON files.
#[derive(Debug, Clone, Default)]
pub struct JsonFileStore {
    config: PersistenceConfig,
}

impl JsonFileStore {
    /// Create an adapter with a validated configuration.
    ///
    /// # Errors
    /// See [`PersistenceConfig::validate`].
    pub fn new(config: PersistenceConfig) -> Result<Self, PersistenceError> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    /// Serialize the full content of `store` to `path`, replacing any prior
    /// document. Returns the number of entities written.
    ///
    /// # Errors
    /// - `Serialization` if an entity cannot be encoded
    /// - `Io` if the file cannot be created, written, synced or renamed
    pub fn save<T>(&self, store: &KeyedStore<T>, path: impl AsRef<Path>) -> Result<usize, PersistenceError>
    where
        T: Entity + Serialize,
    {
        let path = path.as_ref();
        let entities: Vec<&T> = store.iter().collect();
        let bytes = codec::encode(&entities, self.config.pretty)
            .map_err(|e| PersistenceError::serialization(path, e.to_string()))?;

        let mut writer =
            DocumentWriter::create(path, self.config.atomic_replace, self.config.sync_on_write)
                .map_err(|e| PersistenceError::io(path, e))?;
        writer
            .write_all(&bytes)
            .map_err(|e| PersistenceError::io(path, e))?;
        writer.commit().map_err(|e| PersistenceError::io(path, e))?;

        info!(
            path = %path.display(),
            count = entities.len(),
            bytes = bytes.len(),
            "saved document"
        );
        Ok(entities.len())
    }

    /// Read the document at `path` and replace the content of `store` with it.
    ///
    /// # Errors
    /// - `Io` if the file exists but cannot be read
    /// - `DocumentTooLarge` if it exceeds `max_document_bytes`
    /// - `Serialization` if it is not a valid document for `T` or repeats an
    ///   id
    ///
    /// On any error `store` is unchanged.
    pub fn load<T>(&self, store: &mut KeyedStore<T>, path: impl AsRef<Path>) -> Result<LoadOutcome, PersistenceError>
    where
        T: Entity + DeserializeOwned,
    {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no existing document");
                return Ok(LoadOutcome::Absent);
            }
            Err(e) => return Err(PersistenceError::io(path, e)),
        };

        let max = self.config.max_document_bytes;
        let size = file
            .metadata()
            .map_err(|e| PersistenceError::io(path, e))?
            .len();
        if size > max {
            return Err(PersistenceError::DocumentTooLarge {
                path: path.to_path_buf(),
                size,
                max,
            });
        }

        // The file may grow between stat and read; never read past the limit.
        let mut bytes = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
        file.take(max.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(|e| PersistenceError::io(path, e))?;
        let read = bytes.len() as u64;
        if read > max {
            return Err(PersistenceError::DocumentTooLarge {
                path: path.to_path_buf(),
                size: read,
                max,
            });
        }

        let entities: Vec<T> = codec::decode(&bytes)
            .map_err(|e| PersistenceError::serialization(path, e.to_string()))?;
        debug!(path = %path.display(), count = entities.len(), "decoded document");

        store.replace_all(entities).map_err(|e| {
            PersistenceError::serialization(path, format!("document is not a valid store: {e}"))
        })?;

        info!(path = %path.display(), count = store.len(), "loaded document");
        Ok(LoadOutcome::Loaded { count: store.len() })
    }
}

/// Save `store` to `path` with the default configuration.
///
/// # Errors
/// See [`JsonFileStore::save`].
pub fn save<T>(store: &KeyedStore<T>, path: impl AsRef<Path>) -> Result<usize, PersistenceError>
where
    T: Entity + Serialize,
{
    JsonFileStore::default().save(store, path)
}

/// Load `path` into `store` with the default configuration.
///
/// # Errors
/// See [`JsonFileStore::load`].
pub fn load<T>(store: &mut KeyedStore<T>, path: impl AsRef<Path>) -> Result<LoadOutcome, PersistenceError>
where
    T: Entity + DeserializeOwned,
{
    JsonFileStore::default().load(store, path)
}
