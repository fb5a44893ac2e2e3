// ── Remote sync gateway ──
//
// The session mirrors its state through a `SyncGateway` chosen once at
// startup: the hosted table store, or the built-in sample dataset held in
// memory. Both sit behind the same trait object.

pub mod live;
pub mod sample;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::StoreBackend;
use crate::error::CoreError;
use crate::model::{InventoryItem, MaintenanceLogEntry, Measurement, ScheduledTask};

pub use live::LiveGateway;
pub use sample::{SampleDataset, SampleGateway};

/// Storage the session reads from on load and writes through afterwards.
#[async_trait]
pub trait SyncGateway: Send + Sync + 'static {
    /// Short name for logs and status output (`"live"` or `"sample"`).
    fn backend_tag(&self) -> &'static str;

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, CoreError>;

    async fn list_schedule(&self) -> Result<Vec<ScheduledTask>, CoreError>;

    /// Newest first, at most `limit`.
    async fn list_recent_measurements(&self, limit: usize)
    -> Result<Vec<Measurement>, CoreError>;

    async fn insert_measurement(&self, measurement: &Measurement) -> Result<(), CoreError>;

    /// Insert a task and return the row as stored.
    async fn insert_task(&self, task: &ScheduledTask) -> Result<ScheduledTask, CoreError>;

    async fn update_task_completed(&self, id: &str, completed: bool) -> Result<(), CoreError>;

    /// Insert or replace an item keyed by its id.
    async fn upsert_inventory_item(&self, item: &InventoryItem) -> Result<(), CoreError>;

    async fn delete_inventory_item(&self, id: &str) -> Result<(), CoreError>;

    async fn delete_task(&self, id: &str) -> Result<(), CoreError>;

    /// Newest first, at most `limit`.
    async fn list_maintenance_log(
        &self,
        limit: usize,
    ) -> Result<Vec<MaintenanceLogEntry>, CoreError>;
}

/// Build the gateway for a configured backend.
pub fn build_gateway(backend: &StoreBackend) -> Result<Arc<dyn SyncGateway>, CoreError> {
    match backend {
        StoreBackend::Live {
            url,
            anon_key,
            tls,
            timeout,
        } => Ok(Arc::new(LiveGateway::connect(url, anon_key, tls, *timeout)?)),
        StoreBackend::Sample => Ok(Arc::new(SampleGateway::builtin())),
    }
}
