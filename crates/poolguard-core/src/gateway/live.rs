// Gateway backed by the hosted table store.

use std::time::Duration;

use async_trait::async_trait;
use poolguard_api::store::{InventoryRow, NewMeasurement, ScheduleRow};
use poolguard_api::transport::{TlsMode, TransportConfig};
use poolguard_api::TableClient;
use secrecy::SecretString;
use tracing::debug;
use url::Url;

use super::SyncGateway;
use crate::config::TlsVerification;
use crate::error::CoreError;
use crate::model::{InventoryItem, MaintenanceLogEntry, Measurement, ScheduledTask};

pub struct LiveGateway {
    client: TableClient,
}

impl LiveGateway {
    /// Build a keyed client for the store at `url`.
    pub fn connect(
        url: &Url,
        anon_key: &SecretString,
        tls: &TlsVerification,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: match tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            },
            timeout,
        };
        let client = TableClient::from_api_key(url.as_str(), anon_key, &transport)
            .map_err(|e| CoreError::Config {
                message: format!("cannot build store client: {e}"),
            })?;
        debug!(base = %client.base_url(), "live gateway ready");
        Ok(Self { client })
    }

    /// Wrap an already-built client.
    pub fn new(client: TableClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SyncGateway for LiveGateway {
    fn backend_tag(&self) -> &'static str {
        "live"
    }

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, CoreError> {
        let rows = self.client.list_inventory().await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_schedule(&self) -> Result<Vec<ScheduledTask>, CoreError> {
        let rows = self.client.list_schedule().await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_recent_measurements(
        &self,
        limit: usize,
    ) -> Result<Vec<Measurement>, CoreError> {
        let rows = self.client.list_recent_measurements(limit).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_measurement(&self, measurement: &Measurement) -> Result<(), CoreError> {
        self.client
            .insert_measurement(&NewMeasurement::from(measurement))
            .await?;
        Ok(())
    }

    async fn insert_task(&self, task: &ScheduledTask) -> Result<ScheduledTask, CoreError> {
        let row = self.client.insert_task(&ScheduleRow::from(task)).await?;
        Ok(row.into())
    }

    async fn update_task_completed(&self, id: &str, completed: bool) -> Result<(), CoreError> {
        Ok(self.client.update_task_completed(id, completed).await?)
    }

    async fn upsert_inventory_item(&self, item: &InventoryItem) -> Result<(), CoreError> {
        Ok(self
            .client
            .upsert_inventory_item(&InventoryRow::from(item))
            .await?)
    }

    async fn delete_inventory_item(&self, id: &str) -> Result<(), CoreError> {
        Ok(self.client.delete_inventory_item(id).await?)
    }

    async fn delete_task(&self, id: &str) -> Result<(), CoreError> {
        Ok(self.client.delete_task(id).await?)
    }

    async fn list_maintenance_log(
        &self,
        limit: usize,
    ) -> Result<Vec<MaintenanceLogEntry>, CoreError> {
        let rows = self.client.list_maintenance_logs(limit).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
