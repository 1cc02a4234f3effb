//! Warehouse manager: electronics and groceries kept in separate stores.
//!
//! Ids are scoped per store, so an electronics item and a grocery item may
//! share an id.

use chrono::{Days, NaiveDate};
use tracing::{info, warn};

use crate::entity::ItemId;
use crate::error::StockroomResult;
use crate::item::{ElectronicItem, GroceryItem, ItemKind, WarehouseItem};
use crate::storage::{KeyedStore, StoreError};

/// Holds one keyed store per item kind.
#[derive(Debug, Clone, Default)]
pub struct WarehouseManager {
    electronics: KeyedStore<ElectronicItem>,
    groceries: KeyedStore<GroceryItem>,
}

impl WarehouseManager {
    /// Create an empty warehouse.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stock the demo catalogue. Grocery expiry dates are relative to `today`.
    ///
    /// # Errors
    /// Fails if any of the demo ids is already present.
    pub fn seed_data(&mut self, today: NaiveDate) -> StockroomResult<()> {
        self.electronics
            .add(ElectronicItem::new(1, "Laptop", 10, "Dell", 24)?)?;
        self.electronics
            .add(ElectronicItem::new(2, "Smartphone", 15, "Samsung", 12)?)?;

        self.groceries
            .add(GroceryItem::new(1, "Apples", 50, today + Days::new(7))?)?;
        self.groceries
            .add(GroceryItem::new(2, "Milk", 20, today + Days::new(5))?)?;

        info!(
            electronics = self.electronics.len(),
            groceries = self.groceries.len(),
            "seeded warehouse"
        );
        Ok(())
    }

    /// Electronics store.
    #[must_use]
    pub fn electronics(&self) -> &KeyedStore<ElectronicItem> {
        &self.electronics
    }

    /// Mutable electronics store.
    pub fn electronics_mut(&mut self) -> &mut KeyedStore<ElectronicItem> {
        &mut self.electronics
    }

    /// Groceries store.
    #[must_use]
    pub fn groceries(&self) -> &KeyedStore<GroceryItem> {
        &self.groceries
    }

    /// Mutable groceries store.
    pub fn groceries_mut(&mut self) -> &mut KeyedStore<GroceryItem> {
        &mut self.groceries
    }

    /// Increase the stock of an item by `amount`, returning the new quantity.
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `InvalidValue` on overflow. The store is
    /// unchanged on failure.
    pub fn increase_stock(&mut self, kind: ItemKind, id: ItemId, amount: u32) -> Result<u32, StoreError> {
        let delta = i64::from(amount);
        let result = match kind {
            ItemKind::Electronic => self.electronics.adjust_quantity(id, delta),
            ItemKind::Grocery => self.groceries.adjust_quantity(id, delta),
        };
        match &result {
            Ok(quantity) => info!(%kind, %id, quantity, "stock increased"),
            Err(e) => warn!(%kind, %id, error = %e, "stock increase rejected"),
        }
        result
    }

    /// Remove an item.
    ///
    /// # Errors
    /// `NotFound` for an unknown id.
    pub fn remove_item(&mut self, kind: ItemKind, id: ItemId) -> Result<WarehouseItem, StoreError> {
        let result = match kind {
            ItemKind::Electronic => self.electronics.remove(id).map(WarehouseItem::from),
            ItemKind::Grocery => self.groceries.remove(id).map(WarehouseItem::from),
        };
        match &result {
            Ok(_) => info!(%kind, %id, "item removed"),
            Err(e) => warn!(%kind, %id, error = %e, "item removal rejected"),
        }
        result
    }

    /// Every item, groceries first, each kind in ascending id order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<WarehouseItem> {
        self.groceries
            .iter()
            .cloned()
            .map(WarehouseItem::from)
            .chain(self.electronics.iter().cloned().map(WarehouseItem::from))
            .collect()
    }

    /// One display line per item of `kind`.
    #[must_use]
    pub fn report_lines(&self, kind: ItemKind) -> Vec<String> {
        match kind {
            ItemKind::Electronic => self.electronics.iter().map(ToString::to_string).collect(),
            ItemKind::Grocery => self.groceries.iter().map(ToString::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn seeded() -> WarehouseManager {
        let mut manager = WarehouseManager::new();
        manager.seed_data(today()).unwrap();
        manager
    }

    #[test]
    fn seed_populates_both_stores() {
        let manager = seeded();
        assert_eq!(manager.electronics().len(), 2);
        assert_eq!(manager.groceries().len(), 2);

        let milk = manager.groceries().get(ItemId::new(2)).unwrap();
        assert_eq!(milk.expiry_date, NaiveDate::from_ymd_opt(2026, 10, 23).unwrap());
    }

    #[test]
    fn seeding_twice_fails_with_duplicate() {
        let mut manager = seeded();
        let err = manager.seed_data(today()).unwrap_err();
        assert!(err.is_store());
        assert_eq!(manager.electronics().len(), 2);
    }

    #[test]
    fn increase_stock_updates_quantity() {
        let mut manager = seeded();
        let quantity = manager
            .increase_stock(ItemKind::Electronic, ItemId::new(1), 5)
            .unwrap();
        assert_eq!(quantity, 15);
        assert_eq!(manager.electronics().get(ItemId::new(1)).unwrap().quantity, 15);
    }

    #[test]
    fn increase_stock_unknown_id_is_not_found() {
        let mut manager = seeded();
        let before = manager.snapshot();
        let err = manager
            .increase_stock(ItemKind::Grocery, ItemId::new(99), 5)
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(manager.snapshot(), before);
    }

    #[test]
    fn remove_item_then_not_found() {
        let mut manager = seeded();
        let removed = manager.remove_item(ItemKind::Grocery, ItemId::new(1)).unwrap();
        assert_eq!(removed.name(), "Apples");
        assert!(manager
            .remove_item(ItemKind::Grocery, ItemId::new(1))
            .unwrap_err()
            .is_not_found());
        // Same id in the other store is unaffected.
        assert!(manager.electronics().contains(ItemId::new(1)));
    }

    #[test]
    fn duplicate_electronics_id_is_rejected() {
        let mut manager = seeded();
        let tablet = ElectronicItem::new(1, "Tablet", 5, "Apple", 18).unwrap();
        assert!(manager.electronics_mut().add(tablet).unwrap_err().is_duplicate());
    }

    #[test]
    fn negative_grocery_quantity_is_rejected() {
        let mut manager = seeded();
        let err = manager
            .groceries_mut()
            .update_quantity(ItemId::new(1), -10)
            .unwrap_err();
        assert!(err.is_invalid_value());
        assert_eq!(manager.groceries().get(ItemId::new(1)).unwrap().quantity, 50);
    }

    #[test]
    fn report_and_snapshot_order() {
        let manager = seeded();
        let lines = manager.report_lines(ItemKind::Grocery);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[Grocery] ID: 1, Name: Apples"));

        let kinds: Vec<ItemKind> = manager.snapshot().iter().map(WarehouseItem::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ItemKind::Grocery,
                ItemKind::Grocery,
                ItemKind::Electronic,
                ItemKind::Electronic
            ]
        );
    }
}
