//! Inventory log bound to a JSON document.
//!
//! Each session opens an [`InventoryLog`] on a path, works on the in-memory
//! store, and saves it back wholesale. A later session loads the same path to
//! pick up where the previous one stopped.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::entity::ItemId;
use crate::error::StockroomResult;
use crate::item::InventoryItem;
use crate::storage::{JsonFileStore, KeyedStore, LoadOutcome, PersistenceConfig, StoreError};

/// Demo catalogue written by [`InventoryLog::seed_sample_data`].
const SAMPLE_ITEMS: [(u32, &str, u32); 5] = [
    (1, "Laptop", 5),
    (2, "Keyboard", 15),
    (3, "Mouse", 25),
    (4, "Monitor", 10),
    (5, "USB Cable", 50),
];

/// A store of [`InventoryItem`] plus the document it persists to.
#[derive(Debug, Clone)]
pub struct InventoryLog {
    path: PathBuf,
    persistence: JsonFileStore,
    items: KeyedStore<InventoryItem>,
}

impl InventoryLog {
    /// Open an empty log for `path` with the default persistence config.
    /// Nothing is read until [`InventoryLog::load`].
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            persistence: JsonFileStore::default(),
            items: KeyedStore::new(),
        }
    }

    /// Open an empty log with a custom persistence config.
    ///
    /// # Errors
    /// Fails if the config does not validate.
    pub fn with_config(path: impl Into<PathBuf>, config: PersistenceConfig) -> StockroomResult<Self> {
        Ok(Self {
            path: path.into(),
            persistence: JsonFileStore::new(config)?,
            items: KeyedStore::new(),
        })
    }

    /// Backing document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add the five demo items, all stamped with `now`.
    ///
    /// # Errors
    /// Fails if any demo id is already present.
    pub fn seed_sample_data(&mut self, now: DateTime<Utc>) -> StockroomResult<()> {
        for (id, name, quantity) in SAMPLE_ITEMS {
            self.items.add(InventoryItem::new(id, name, quantity, now)?)?;
        }
        info!(count = SAMPLE_ITEMS.len(), "seeded inventory log");
        Ok(())
    }

    /// Add one item.
    ///
    /// # Errors
    /// `DuplicateIdentity` if the id is taken.
    pub fn add(&mut self, item: InventoryItem) -> Result<(), StoreError> {
        self.items.add(item)
    }

    /// Remove one item.
    ///
    /// # Errors
    /// `NotFound` if the id is absent.
    pub fn remove(&mut self, id: ItemId) -> Result<InventoryItem, StoreError> {
        self.items.remove(id)
    }

    /// The in-memory store.
    #[must_use]
    pub fn store(&self) -> &KeyedStore<InventoryItem> {
        &self.items
    }

    /// The in-memory store, for quantity updates.
    pub fn store_mut(&mut self) -> &mut KeyedStore<InventoryItem> {
        &mut self.items
    }

    /// Snapshot of all items.
    #[must_use]
    pub fn items(&self) -> Vec<InventoryItem> {
        self.items.list_all()
    }

    /// Write the whole log to its document. Returns the item count.
    ///
    /// # Errors
    /// Serialization or I/O failure.
    pub fn save(&self) -> StockroomResult<usize> {
        Ok(self.persistence.save(&self.items, &self.path)?)
    }

    /// Replace the in-memory log with the document's content.
    ///
    /// # Errors
    /// Malformed document or I/O failure; the log is unchanged.
    pub fn load(&mut self) -> StockroomResult<LoadOutcome> {
        Ok(self.persistence.load(&mut self.items, &self.path)?)
    }

    /// One display line per item, in id order.
    #[must_use]
    pub fn render_lines(&self) -> Vec<String> {
        self.items.iter().map(ToString::to_string).collect()
    }
}
