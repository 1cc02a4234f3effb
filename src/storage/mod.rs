//! Storage layer for Stockroom.
//!
//! [`KeyedStore`] holds a collection in memory; [`persistent`] moves a whole
//! store to and from a JSON document.

mod error;
mod memory;
pub mod persistent;

pub use error::{PersistenceError, StoreError};
pub use memory::KeyedStore;
pub use persistent::{load, save, JsonFileStore, LoadOutcome, PersistenceConfig};
