//! In-memory keyed store.
//!
//! [`KeyedStore`] maps [`ItemId`] to an owned entity and is the single source
//! of truth for a collection while the process runs. Every mutation is
//! all-or-nothing: a failed call leaves the map exactly as it was.

use std::collections::btree_map::{self, BTreeMap};

use crate::entity::{Entity, ItemId, Stocked};
use crate::storage::error::StoreError;

/// Generic in-memory repository keyed by entity id.
///
/// Enumeration is in ascending id order.
///
/// # Examples
///
/// ```
/// use stockroom::{ElectronicItem, ItemId, KeyedStore};
///
/// let mut store = KeyedStore::new();
/// store.add(ElectronicItem::new(1, "Laptop", 10, "Dell", 24)?)?;
///
/// store.update_quantity(ItemId::new(1), 12)?;
/// assert_eq!(store.get(ItemId::new(1))?.quantity, 12);
///
/// let err = store.update_quantity(ItemId::new(1), -3).unwrap_err();
/// assert!(err.is_invalid_value());
/// # Ok::<(), stockroom::StockroomError>(())
/// ```
#[derive(Debug, Clone)]
pub struct KeyedStore<T> {
    by_id: BTreeMap<ItemId, T>,
}

impl<T> Default for KeyedStore<T> {
    fn default() -> Self {
        Self {
            by_id: BTreeMap::new(),
        }
    }
}

impl<T: Entity> KeyedStore<T> {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a sequence of entities.
    ///
    /// # Errors
    /// `DuplicateIdentity` for the first repeated id.
    pub fn from_entities(entities: impl IntoIterator<Item = T>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for entity in entities {
            store.add(entity)?;
        }
        Ok(store)
    }

    /// Insert a new entity.
    ///
    /// # Errors
    /// `DuplicateIdentity` if the id is already present; the store is not
    /// modified.
    pub fn add(&mut self, entity: T) -> Result<(), StoreError> {
        match self.by_id.entry(entity.id()) {
            btree_map::Entry::Occupied(slot) => Err(StoreError::DuplicateIdentity(*slot.key())),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(entity);
                Ok(())
            }
        }
    }

    /// Look up an entity by id.
    ///
    /// # Errors
    /// `NotFound` if the id is absent.
    pub fn get(&self, id: ItemId) -> Result<&T, StoreError> {
        self.by_id.get(&id).ok_or(StoreError::NotFound(id))
    }

    /// Remove an entity, returning it.
    ///
    /// # Errors
    /// `NotFound` if the id is absent.
    pub fn remove(&mut self, id: ItemId) -> Result<T, StoreError> {
        self.by_id.remove(&id).ok_or(StoreError::NotFound(id))
    }

    /// Returns true if an entity with this id is stored.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Number of stored entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if the store holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Stored ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<ItemId> {
        self.by_id.keys().copied().collect()
    }

    /// Borrowing iterator over stored entities in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.by_id.values()
    }

    /// Remove every entity.
    pub fn clear(&mut self) {
        self.by_id.clear();
    }

    /// Replace the entire content with `entities`.
    ///
    /// The replacement map is built aside and swapped in only when it is
    /// complete.
    ///
    /// # Errors
    /// `DuplicateIdentity` if `entities` repeats an id; the current content
    /// is kept.
    pub fn replace_all(&mut self, entities: impl IntoIterator<Item = T>) -> Result<(), StoreError> {
        let replacement = Self::from_entities(entities)?;
        self.by_id = replacement.by_id;
        Ok(())
    }
}

impl<T: Entity + Clone> KeyedStore<T> {
    /// Snapshot of all entities in ascending id order.
    ///
    /// The returned vector is detached from the store.
    #[must_use]
    pub fn list_all(&self) -> Vec<T> {
        self.by_id.values().cloned().collect()
    }
}

impl<T: Stocked> KeyedStore<T> {
    /// Overwrite the quantity of an entity.
    ///
    /// The value is validated before the id is resolved.
    ///
    /// # Errors
    /// - `InvalidValue` if `new_quantity` is negative or does not fit a `u32`
    /// - `NotFound` if the id is absent
    pub fn update_quantity(&mut self, id: ItemId, new_quantity: i64) -> Result<(), StoreError> {
        if new_quantity < 0 {
            return Err(StoreError::invalid_value(format!(
                "quantity cannot be negative (got {new_quantity})"
            )));
        }
        let quantity = u32::try_from(new_quantity).map_err(|_| {
            StoreError::invalid_value(format!(
                "quantity {new_quantity} exceeds maximum {}",
                u32::MAX
            ))
        })?;

        let entity = self.by_id.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        entity.set_quantity(quantity);
        Ok(())
    }

    /// Add `delta` (possibly negative) to an entity's quantity.
    ///
    /// Returns the new quantity.
    ///
    /// # Errors
    /// - `NotFound` if the id is absent
    /// - `InvalidValue` if the result would be negative or overflow
    pub fn adjust_quantity(&mut self, id: ItemId, delta: i64) -> Result<u32, StoreError> {
        let current = i64::from(self.get(id)?.quantity());
        let target = current.checked_add(delta).ok_or_else(|| {
            StoreError::invalid_value(format!("quantity {current} + {delta} overflows"))
        })?;
        self.update_quantity(id, target)?;
        Ok(self.get(id)?.quantity())
    }
}

impl<'a, T> IntoIterator for &'a KeyedStore<T> {
    type Item = &'a T;
    type IntoIter = btree_map::Values<'a, ItemId, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_id.values()
    }
}
