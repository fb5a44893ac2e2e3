// ── Inventory ledger ──
//
// Ordered list of stock items. Quantities and targets are rounded to two
// decimals on every adjustment and never drop below zero.

use uuid::Uuid;

use crate::model::{InventoryItem, Unit};

/// Round to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `max(0, round2(value))`, with NaN treated as zero.
fn clamp_quantity(value: f64) -> f64 {
    let rounded = round2(value);
    if rounded.is_nan() { 0.0 } else { rounded.max(0.0) }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryLedger {
    items: Vec<InventoryItem>,
}

impl InventoryLedger {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Find by id, or by case-insensitive name when no id matches.
    pub fn find(&self, key: &str) -> Option<&InventoryItem> {
        self.get(key)
            .or_else(|| self.items.iter().find(|i| i.name.eq_ignore_ascii_case(key)))
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut InventoryItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// Add `delta` to the on-hand quantity. `None` if the id is unknown.
    pub fn adjust_quantity(&mut self, id: &str, delta: f64) -> Option<&InventoryItem> {
        let item = self.get_mut(id)?;
        item.quantity = clamp_quantity(item.quantity + delta);
        Some(item)
    }

    /// Add `delta` to the target quantity. `None` if the id is unknown.
    pub fn adjust_target(&mut self, id: &str, delta: f64) -> Option<&InventoryItem> {
        let item = self.get_mut(id)?;
        item.target_quantity = clamp_quantity(item.target_quantity + delta);
        Some(item)
    }

    /// Items below target, in ledger order.
    pub fn shortages(&self) -> Vec<&InventoryItem> {
        self.items.iter().filter(|i| i.is_short()).collect()
    }

    /// Append a new item with a fresh id.
    pub fn add_item(
        &mut self,
        name: &str,
        quantity: f64,
        target_quantity: f64,
        unit: Unit,
    ) -> &InventoryItem {
        let index = self.items.len();
        self.items.push(InventoryItem {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_owned(),
            quantity: clamp_quantity(quantity),
            target_quantity: clamp_quantity(target_quantity),
            unit,
        });
        &self.items[index]
    }

    /// Remove by id. Removing an absent id is a no-op.
    pub fn remove_item(&mut self, id: &str) -> Option<InventoryItem> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }
}
