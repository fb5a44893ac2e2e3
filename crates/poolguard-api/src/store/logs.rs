// Maintenance log endpoints (read-only)

use tracing::debug;

use super::client::TableClient;
use super::rows::{MaintenanceLogRow, tables};
use crate::error::Error;

impl TableClient {
    /// Most recent maintenance log entries, newest first.
    ///
    /// `GET /maintenance_logs?select=*&order=date.desc&limit={limit}`
    pub async fn list_maintenance_logs(
        &self,
        limit: usize,
    ) -> Result<Vec<MaintenanceLogRow>, Error> {
        debug!(limit, "listing maintenance logs");
        self.select(
            tables::MAINTENANCE_LOGS,
            &[
                ("select", "*".into()),
                ("order", "date.desc".into()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }
}
