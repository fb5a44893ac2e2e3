// Inventory table endpoints

use tracing::debug;

use super::client::TableClient;
use super::rows::{InventoryRow, tables};
use crate::error::Error;

impl TableClient {
    /// List every inventory row in store order.
    ///
    /// `GET /inventory?select=*`
    pub async fn list_inventory(&self) -> Result<Vec<InventoryRow>, Error> {
        debug!("listing inventory");
        self.select(tables::INVENTORY, &[("select", "*".into())])
            .await
    }

    /// Insert or replace an inventory row keyed by `id`.
    ///
    /// `POST /inventory` with `Prefer: resolution=merge-duplicates`
    pub async fn upsert_inventory_item(&self, row: &InventoryRow) -> Result<(), Error> {
        debug!(id = %row.id, quantity = row.quantity, "upserting inventory item");
        self.upsert(tables::INVENTORY, row).await
    }

    /// Delete an inventory row.
    ///
    /// `DELETE /inventory?id=eq.{id}`
    pub async fn delete_inventory_item(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting inventory item");
        self.delete(tables::INVENTORY, id).await
    }
}
