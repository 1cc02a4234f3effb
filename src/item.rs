//! Stock-keeping record types.
//!
//! Every record validates its required fields at construction; once built,
//! its payload is opaque to the store apart from `id` and `quantity`.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{require_text, Entity, ItemId, Stocked};
use crate::error::ValidationError;

/// A logged inventory line with the time it was recorded.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use stockroom::InventoryItem;
///
/// let item = InventoryItem::new(1, "Laptop", 5, Utc::now()).unwrap();
/// assert_eq!(item.name, "Laptop");
/// assert!(InventoryItem::new(2, "  ", 5, Utc::now()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(deserialize_with = "crate::entity::checked::id")]
    pub id: ItemId,
    #[serde(deserialize_with = "crate::entity::checked::name")]
    pub name: String,
    pub quantity: u32,
    pub date_added: DateTime<Utc>,
}

impl InventoryItem {
    /// Creates a validated inventory item.
    ///
    /// # Errors
    /// `InvalidIdentifier` for id `0`, `EmptyField` for a blank name.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        quantity: u32,
        date_added: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: ItemId::parse(id)?,
            name: require_text("name", name.into())?,
            quantity,
            date_added,
        })
    }
}

impl fmt::Display for InventoryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Qty: {}, Added: {}",
            self.id,
            self.name,
            self.quantity,
            self.date_added.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// An electronics line with brand and warranty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectronicItem {
    #[serde(deserialize_with = "crate::entity::checked::id")]
    pub id: ItemId,
    #[serde(deserialize_with = "crate::entity::checked::name")]
    pub name: String,
    pub quantity: u32,
    #[serde(deserialize_with = "crate::entity::checked::brand")]
    pub brand: String,
    pub warranty_months: u32,
}

impl ElectronicItem {
    /// Creates a validated electronics item.
    ///
    /// # Errors
    /// `InvalidIdentifier` for id `0`, `EmptyField` for a blank name or brand.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        quantity: u32,
        brand: impl Into<String>,
        warranty_months: u32,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: ItemId::parse(id)?,
            name: require_text("name", name.into())?,
            quantity,
            brand: require_text("brand", brand.into())?,
            warranty_months,
        })
    }
}

impl fmt::Display for ElectronicItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Electronic] ID: {}, Name: {}, Brand: {}, Warranty: {} months, Qty: {}",
            self.id, self.name, self.brand, self.warranty_months, self.quantity
        )
    }
}

/// A perishable grocery line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryItem {
    #[serde(deserialize_with = "crate::entity::checked::id")]
    pub id: ItemId,
    #[serde(deserialize_with = "crate::entity::checked::name")]
    pub name: String,
    pub quantity: u32,
    pub expiry_date: NaiveDate,
}

impl GroceryItem {
    /// Creates a validated grocery item.
    ///
    /// # Errors
    /// `InvalidIdentifier` for id `0`, `EmptyField` for a blank name.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        quantity: u32,
        expiry_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: ItemId::parse(id)?,
            name: require_text("name", name.into())?,
            quantity,
            expiry_date,
        })
    }

    /// Returns true if the item expires before `today`.
    #[must_use]
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }
}

impl fmt::Display for GroceryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Grocery] ID: {}, Name: {}, Expiry: {}, Qty: {}",
            self.id,
            self.name,
            self.expiry_date.format("%Y-%m-%d"),
            self.quantity
        )
    }
}

macro_rules! stocked_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Entity for $ty {
                fn id(&self) -> ItemId {
                    self.id
                }
            }

            impl Stocked for $ty {
                fn quantity(&self) -> u32 {
                    self.quantity
                }

                fn set_quantity(&mut self, quantity: u32) {
                    self.quantity = quantity;
                }
            }
        )+
    };
}

stocked_record!(InventoryItem, ElectronicItem, GroceryItem);

/// Closed set of warehouse item shapes.
///
/// Serialized with a `"kind"` tag next to the record's own fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarehouseItem {
    /// Electronics line.
    Electronic(ElectronicItem),
    /// Grocery line.
    Grocery(GroceryItem),
}

impl WarehouseItem {
    /// Category of the variant.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Electronic(_) => ItemKind::Electronic,
            Self::Grocery(_) => ItemKind::Grocery,
        }
    }

    /// Item name, whichever the variant.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Electronic(item) => &item.name,
            Self::Grocery(item) => &item.name,
        }
    }
}

impl Entity for WarehouseItem {
    fn id(&self) -> ItemId {
        match self {
            Self::Electronic(item) => item.id(),
            Self::Grocery(item) => item.id(),
        }
    }
}

impl Stocked for WarehouseItem {
    fn quantity(&self) -> u32 {
        match self {
            Self::Electronic(item) => item.quantity(),
            Self::Grocery(item) => item.quantity(),
        }
    }

    fn set_quantity(&mut self, quantity: u32) {
        match self {
            Self::Electronic(item) => item.set_quantity(quantity),
            Self::Grocery(item) => item.set_quantity(quantity),
        }
    }
}

impl fmt::Display for WarehouseItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Electronic(item) => fmt::Display::fmt(item, f),
            Self::Grocery(item) => fmt::Display::fmt(item, f),
        }
    }
}

impl From<ElectronicItem> for WarehouseItem {
    fn from(item: ElectronicItem) -> Self {
        Self::Electronic(item)
    }
}

impl From<GroceryItem> for WarehouseItem {
    fn from(item: GroceryItem) -> Self {
        Self::Grocery(item)
    }
}

/// Warehouse item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Electronics.
    Electronic,
    /// Groceries.
    Grocery,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Electronic => write!(f, "electronic"),
            Self::Grocery => write!(f, "grocery"),
        }
    }
}
