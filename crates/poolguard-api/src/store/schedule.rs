// Schedule table endpoints

use tracing::debug;

use super::client::TableClient;
use super::rows::{ScheduleRow, TaskCompletedPatch, tables};
use crate::error::Error;

impl TableClient {
    /// List every scheduled task in store order.
    ///
    /// `GET /schedule?select=*`
    pub async fn list_schedule(&self) -> Result<Vec<ScheduleRow>, Error> {
        debug!("listing schedule");
        self.select(tables::SCHEDULE, &[("select", "*".into())])
            .await
    }

    /// Insert a task and return the row as stored.
    ///
    /// `POST /schedule` with `Prefer: return=representation`. The store
    /// answers with an array; the first element is the created row.
    pub async fn insert_task(&self, row: &ScheduleRow) -> Result<ScheduleRow, Error> {
        debug!(id = %row.id, "inserting task");
        let mut created: Vec<ScheduleRow> = self.insert(tables::SCHEDULE, row).await?;
        if created.is_empty() {
            return Err(Error::Deserialization {
                message: "insert returned no rows".into(),
                body: "[]".into(),
            });
        }
        Ok(created.swap_remove(0))
    }

    /// Set a task's completion flag.
    ///
    /// `PATCH /schedule?id=eq.{id}` with `{"completed": bool}`
    pub async fn update_task_completed(&self, id: &str, completed: bool) -> Result<(), Error> {
        debug!(id, completed, "updating task completion");
        self.update(tables::SCHEDULE, id, &TaskCompletedPatch { completed })
            .await
    }

    /// Delete a task.
    ///
    /// `DELETE /schedule?id=eq.{id}`
    pub async fn delete_task(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting task");
        self.delete(tables::SCHEDULE, id).await
    }
}
