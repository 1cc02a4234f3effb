//! Entity identity and capability contracts.
//!
//! The keyed store is generic over any record type that can name itself with
//! a stable [`ItemId`]. Records that also carry a stock level implement
//! [`Stocked`], which unlocks the quantity operations on the store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Integer identity key of a stored entity.
///
/// Unique within one store instance. Zero is reserved and rejected by the
/// record constructors in [`crate::item`] and [`crate::clinic`].
///
/// # Examples
///
/// ```
/// use stockroom::ItemId;
///
/// let id = ItemId::new(7);
/// assert_eq!(id.get(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    /// Wraps a raw identifier without validation.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Wraps a raw identifier, rejecting the reserved zero value.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidIdentifier`] for `0`.
    pub fn parse(raw: u32) -> Result<Self, ValidationError> {
        if raw == 0 {
            return Err(ValidationError::InvalidIdentifier {
                value: raw.to_string(),
            });
        }
        Ok(Self(raw))
    }

    /// Returns the raw integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<ItemId> for u32 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

/// A record that can be held in a [`crate::KeyedStore`].
pub trait Entity {
    /// Stable identity key.
    fn id(&self) -> ItemId;
}

/// A record with a non-negative stock level.
///
/// The store only mutates the quantity through
/// [`crate::KeyedStore::update_quantity`], which validates the value first.
pub trait Stocked: Entity {
    /// Current quantity.
    fn quantity(&self) -> u32;

    /// Overwrites the quantity.
    fn set_quantity(&mut self, quantity: u32);
}

/// Rejects empty or whitespace-only text for a required field.
pub(crate) fn require_text(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField {
            field: field.to_string(),
        });
    }
    Ok(value)
}

/// Field deserializers applying the same rules as the record constructors,
/// so a loaded document cannot hold a value `new` would reject.
pub(crate) mod checked {
    use serde::{Deserialize, Deserializer};

    use super::{require_text, ItemId};

    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ItemId, D::Error> {
        ItemId::parse(u32::deserialize(deserializer)?).map_err(serde::de::Error::custom)
    }

    fn text<'de, D: Deserializer<'de>>(field: &'static str, deserializer: D) -> Result<String, D::Error> {
        require_text(field, String::deserialize(deserializer)?).map_err(serde::de::Error::custom)
    }

    pub fn name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        text("name", deserializer)
    }

    pub fn brand<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        text("brand", deserializer)
    }

    pub fn gender<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        text("gender", deserializer)
    }

    pub fn medication_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        text("medication_name", deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_parse_rejects_zero() {
        let err = ItemId::parse(0).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidIdentifier { .. }));
        assert_eq!(ItemId::parse(3).unwrap(), ItemId::new(3));
    }

    #[test]
    fn test_item_id_ordering_follows_raw_value() {
        let mut ids = vec![ItemId::new(9), ItemId::new(1), ItemId::new(4)];
        ids.sort();
        assert_eq!(ids, vec![ItemId::new(1), ItemId::new(4), ItemId::new(9)]);
    }

    #[test]
    fn test_item_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&ItemId::new(42)).unwrap();
        assert_eq!(json, "42");
        let back: ItemId = serde_json::from_str("42").unwrap();
        assert_eq!(back.get(), 42);
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("name", "Laptop".into()).unwrap(), "Laptop");
        let err = require_text("name", "   ".into()).unwrap_err();
        assert!(err.to_string().contains("name"));
    }
}
