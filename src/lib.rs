//! # Stockroom - typed entity stores with JSON persistence
//!
//! Stockroom keeps collections of domain records in memory, keyed by an
//! integer id, and moves whole collections to and from JSON documents.
//!
//! ## Core Concepts
//!
//! - **Entity**: any record exposing a stable [`ItemId`]; [`Stocked`] entities
//!   also expose a non-negative quantity
//! - **KeyedStore**: the in-memory map enforcing id uniqueness and validated
//!   quantity updates
//! - **JsonFileStore**: saves a store as one JSON array and loads it back,
//!   replacing the store's content
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stockroom::{ElectronicItem, ItemId, JsonFileStore, KeyedStore};
//!
//! let mut store = KeyedStore::new();
//! store.add(ElectronicItem::new(1, "Laptop", 10, "Dell", 24)?)?;
//! store.adjust_quantity(ItemId::new(1), 5)?;
//!
//! let persistence = JsonFileStore::default();
//! persistence.save(&store, "electronics.json")?;
//!
//! let mut reloaded = KeyedStore::<ElectronicItem>::new();
//! persistence.load(&mut reloaded, "electronics.json")?;
//! assert_eq!(reloaded.get(ItemId::new(1))?.quantity, 15);
//! # Ok::<(), stockroom::StockroomError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core: identity, records, storage
pub mod entity;
pub mod error;
pub mod item;
pub mod storage;

// Front-ends built on the store
pub mod clinic;
pub mod grading;
pub mod inventory_log;
pub mod warehouse;

// Re-export primary types at crate root for convenience
pub use entity::{Entity, ItemId, Stocked};
pub use error::{StockroomError, StockroomResult, ValidationError};
pub use item::{ElectronicItem, GroceryItem, InventoryItem, ItemKind, WarehouseItem};
pub use storage::{
    JsonFileStore, KeyedStore, LoadOutcome, PersistenceConfig, PersistenceError, StoreError,
};

pub use clinic::{HealthRegistry, Patient, Prescription};
pub use grading::{Grade, GradingError, Student};
pub use inventory_log::InventoryLog;
pub use warehouse::WarehouseManager;
