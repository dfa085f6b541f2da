use std::collections::BTreeMap;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::store::{JsonFileStore, StoreError};

/// Errors that can occur while operating on the inventory.
///
/// Everything except the `Store` variant is recoverable: the operation was
/// rejected before any state changed and the caller can report it and carry
/// on. Store errors mean the backing file itself is unusable and should
/// terminate the process.
#[derive(thiserror::Error, Debug)]
pub enum InventoryError {
    #[error("Quantity must be a positive whole number")]
    InvalidQuantity,
    #[error("Price must be a positive number")]
    InvalidPrice,
    #[error("A price is required when adding a new item")]
    MissingPrice,
    #[error("'{item}' is not in the inventory")]
    ItemNotFound { item: String },
    #[error("Cannot deduct {requested}. '{item}' only has {available} in stock")]
    InsufficientStock { item: String, requested: u64, available: u64 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Stored quantity and unit price for a single inventory item.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ItemRecord {
    pub quantity: u64,
    pub price: f64,
}

impl ItemRecord {
    pub fn total(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

/// One row of a listing or lookup: the item's name, its stored record, and
/// the computed total value (quantity times price).
#[derive(Debug, Clone, PartialEq)]
pub struct ItemLine {
    pub name: String,
    pub quantity: u64,
    pub price: f64,
    pub total: f64,
}

/// Outcome of a successful deduction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deduction {
    /// Stock remains after the deduction.
    Remaining(u64),
    /// The deduction emptied the stock and the item was removed.
    Depleted,
}

/// An inventory of named items, each with a quantity and a unit price,
/// persisted in full to a single JSON file after every successful mutation.
///
/// Items are keyed by name. An item whose quantity reaches zero is removed
/// outright; no zero-quantity entry is ever persisted. Every mutating
/// operation validates its inputs completely before touching state, so a
/// rejected operation leaves both the in-memory map and the file untouched.
pub struct Inventory {
    items: BTreeMap<String, ItemRecord>,
    store: JsonFileStore<BTreeMap<String, ItemRecord>>,
}

impl Inventory {
    /// Opens the inventory backed by the JSON file at `path`, loading its
    /// current contents. A missing file opens as an empty inventory.
    pub fn open(path: impl Into<Utf8PathBuf>) -> Result<Inventory, StoreError> {
        let store = JsonFileStore::at(path);
        let items = store.load()?;
        Ok(Inventory { items, store })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// The currently stored price for an item, if it exists.
    pub fn price_of(&self, name: &str) -> Option<f64> {
        self.items.get(name).map(|record| record.price)
    }

    /// Adds a new item or tops up an existing one.
    ///
    /// Quantity must be positive and accumulates onto any existing stock.
    /// For an existing item the price is optional; when supplied it replaces
    /// the stored price. For a new item the price is mandatory. Prices must
    /// be positive and finite. Returns the record as stored after the add.
    pub fn add(&mut self, name: &str, quantity: u64, price: Option<f64>)
        -> Result<ItemRecord, InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::InvalidQuantity);
        }
        if let Some(p) = price {
            validate_price(p)?;
        }

        let record = match self.items.get_mut(name) {
            Some(record) => {
                record.quantity += quantity;
                if let Some(p) = price {
                    record.price = p;
                }
                *record
            },
            None => {
                let record = ItemRecord {
                    quantity,
                    price: price.ok_or(InventoryError::MissingPrice)?,
                };
                self.items.insert(name.to_owned(), record);
                record
            },
        };

        self.store.save(&self.items)?;
        log::debug!("Added {quantity} of '{name}', now at {}", record.quantity);
        Ok(record)
    }

    /// Overwrites the stored price of an existing item.
    pub fn adjust_price(&mut self, name: &str, new_price: f64) -> Result<(), InventoryError> {
        validate_price(new_price)?;
        let record = self.items.get_mut(name)
            .ok_or_else(|| InventoryError::ItemNotFound { item: name.to_owned() })?;
        record.price = new_price;

        self.store.save(&self.items)?;
        log::debug!("Adjusted price of '{name}' to {new_price:.2}");
        Ok(())
    }

    /// Deducts stock from an existing item. Deducting more than is in stock
    /// is rejected without touching state. Deducting the exact stock removes
    /// the item entirely.
    pub fn deduct(&mut self, name: &str, quantity: u64) -> Result<Deduction, InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::InvalidQuantity);
        }
        let record = self.items.get_mut(name)
            .ok_or_else(|| InventoryError::ItemNotFound { item: name.to_owned() })?;
        if quantity > record.quantity {
            return Err(InventoryError::InsufficientStock {
                item: name.to_owned(),
                requested: quantity,
                available: record.quantity,
            });
        }

        record.quantity -= quantity;
        let remaining = record.quantity;
        let outcome = if remaining == 0 {
            // No zero-quantity entries persist
            self.items.remove(name);
            Deduction::Depleted
        } else {
            Deduction::Remaining(remaining)
        };

        self.store.save(&self.items)?;
        log::debug!("Deducted {quantity} from '{name}', {remaining} remaining");
        Ok(outcome)
    }

    /// Deletes an item outright. Confirmation of destructive removal is the
    /// caller's concern; by the time this is called the decision is made.
    pub fn remove(&mut self, name: &str) -> Result<(), InventoryError> {
        if self.items.remove(name).is_none() {
            return Err(InventoryError::ItemNotFound { item: name.to_owned() });
        }

        self.store.save(&self.items)?;
        log::debug!("Removed '{name}' from the inventory");
        Ok(())
    }

    /// Looks up a single item. Never mutates.
    pub fn find(&self, name: &str) -> Option<ItemLine> {
        self.items.get(name).map(|record| line(name, record))
    }

    /// All items sorted lexicographically by name, each with its computed
    /// total value. Never mutates.
    pub fn list_all(&self) -> Vec<ItemLine> {
        self.items.iter().map(|(name, record)| line(name, record)).collect()
    }
}

fn line(name: &str, record: &ItemRecord) -> ItemLine {
    ItemLine {
        name: name.to_owned(),
        quantity: record.quantity,
        price: record.price,
        total: record.total(),
    }
}

fn validate_price(price: f64) -> Result<(), InventoryError> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(InventoryError::InvalidPrice)
    }
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    use super::*;

    fn open_in(dir: &TempDir) -> Inventory {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("inventory.json"))
            .expect("temp dir path is not valid UTF-8");
        Inventory::open(path).expect("open should succeed")
    }

    #[test]
    fn add_then_find_returns_same_quantity_and_price() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut inv = open_in(&dir);

        inv.add("bolt", 10, Some(0.50)).expect("add should succeed");

        let found = inv.find("bolt").expect("item should be present");
        assert_eq!(found.quantity, 10);
        assert_eq!(found.price, 0.50);
        assert_eq!(found.total, 5.0);
    }

    #[test]
    fn adding_twice_accumulates_quantity_and_keeps_price_when_omitted() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut inv = open_in(&dir);

        inv.add("nut", 4, Some(1.25)).expect("first add should succeed");
        let record = inv.add("nut", 6, None).expect("second add should succeed");

        assert_eq!(record.quantity, 10);
        assert_eq!(record.price, 1.25);
    }

    #[test]
    fn adding_twice_overwrites_price_when_supplied() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut inv = open_in(&dir);

        inv.add("nut", 4, Some(1.25)).expect("first add should succeed");
        let record = inv.add("nut", 1, Some(2.00)).expect("second add should succeed");

        assert_eq!(record.quantity, 5);
        assert_eq!(record.price, 2.00);
    }

    #[test]
    fn zero_quantity_add_is_rejected_without_mutation() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut inv = open_in(&dir);

        let err = inv.add("washer", 0, Some(0.10)).expect_err("zero quantity should fail");
        assert!(matches!(err, InventoryError::InvalidQuantity));
        assert!(inv.is_empty());
    }

    #[test]
    fn new_item_without_price_is_rejected() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut inv = open_in(&dir);

        let err = inv.add("washer", 5, None).expect_err("missing price should fail");
        assert!(matches!(err, InventoryError::MissingPrice));
        assert!(inv.is_empty());
    }

    #[test]
    fn non_positive_and_non_finite_prices_are_rejected() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut inv = open_in(&dir);

        for bad in [0.0, -1.5, f64::NAN, f64::INFINITY] {
            let err = inv.add("washer", 5, Some(bad)).expect_err("bad price should fail");
            assert!(matches!(err, InventoryError::InvalidPrice));
        }
        assert!(inv.is_empty());
    }

    #[test]
    fn deducting_exact_stock_removes_the_item() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut inv = open_in(&dir);

        inv.add("bolt", 10, Some(0.50)).expect("add should succeed");
        let outcome = inv.deduct("bolt", 10).expect("deduct should succeed");

        assert!(matches!(outcome, Deduction::Depleted));
        assert!(inv.find("bolt").is_none());
        assert!(inv.list_all().is_empty());
    }

    #[test]
    fn deducting_part_of_stock_leaves_remainder() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut inv = open_in(&dir);

        inv.add("bolt", 10, Some(0.50)).expect("add should succeed");
        let outcome = inv.deduct("bolt", 3).expect("deduct should succeed");

        assert!(matches!(outcome, Deduction::Remaining(7)));
        assert_eq!(inv.find("bolt").expect("item should remain").quantity, 7);
    }

    #[test]
    fn over_deducting_is_rejected_without_mutation() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut inv = open_in(&dir);

        inv.add("bolt", 10, Some(0.50)).expect("add should succeed");
        let err = inv.deduct("bolt", 11).expect_err("over-deduct should fail");

        assert!(matches!(err, InventoryError::InsufficientStock { available: 10, .. }));
        assert_eq!(inv.find("bolt").expect("item should remain").quantity, 10);
    }

    #[test]
    fn deducting_from_missing_item_is_rejected() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut inv = open_in(&dir);

        let err = inv.deduct("ghost", 1).expect_err("missing item should fail");
        assert!(matches!(err, InventoryError::ItemNotFound { .. }));
    }

    #[test]
    fn adjust_price_overwrites_and_requires_existing_item() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut inv = open_in(&dir);

        inv.add("bolt", 10, Some(0.50)).expect("add should succeed");
        inv.adjust_price("bolt", 0.75).expect("adjust should succeed");
        assert_eq!(inv.find("bolt").expect("item should be present").price, 0.75);

        let err = inv.adjust_price("ghost", 1.0).expect_err("missing item should fail");
        assert!(matches!(err, InventoryError::ItemNotFound { .. }));
    }

    #[test]
    fn remove_deletes_item_and_rejects_missing_names() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut inv = open_in(&dir);

        inv.add("bolt", 10, Some(0.50)).expect("add should succeed");
        inv.remove("bolt").expect("remove should succeed");
        assert!(inv.is_empty());

        let err = inv.remove("bolt").expect_err("second remove should fail");
        assert!(matches!(err, InventoryError::ItemNotFound { .. }));
    }

    #[test]
    fn list_all_is_sorted_by_name_with_totals() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut inv = open_in(&dir);

        inv.add("washer", 2, Some(0.10)).expect("add should succeed");
        inv.add("bolt", 10, Some(0.50)).expect("add should succeed");
        inv.add("nut", 4, Some(0.25)).expect("add should succeed");

        let lines = inv.list_all();
        let names: Vec<&str> = lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["bolt", "nut", "washer"]);
        assert_eq!(lines[0].total, 5.0);
    }

    #[test]
    fn mutations_persist_across_reopen() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("inventory.json"))
            .expect("temp dir path is not valid UTF-8");

        let mut inv = Inventory::open(path.clone()).expect("open should succeed");
        inv.add("bolt", 10, Some(0.50)).expect("add should succeed");
        drop(inv);

        let reopened = Inventory::open(path).expect("reopen should succeed");
        let found = reopened.find("bolt").expect("item should have persisted");
        assert_eq!(found.quantity, 10);
        assert_eq!(found.price, 0.50);
    }
}
