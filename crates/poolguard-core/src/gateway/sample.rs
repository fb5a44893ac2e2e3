// In-memory gateway over the built-in sample dataset.
//
// Used when no store is configured and as the session's fallback when the
// store is unreachable. Writes mutate the in-memory tables only.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use super::SyncGateway;
use crate::error::CoreError;
use crate::model::{
    Category, ChemicalAddition, Frequency, InventoryItem, MaintenanceLogEntry, Measurement,
    ScheduledTask, Unit, WaterState,
};

/// Everything a session can load, held as plain vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleDataset {
    pub inventory: Vec<InventoryItem>,
    pub schedule: Vec<ScheduledTask>,
    /// Newest first.
    pub measurements: Vec<Measurement>,
    /// Newest first.
    pub logs: Vec<MaintenanceLogEntry>,
}

fn item(id: &str, name: &str, quantity: f64, target_quantity: f64, unit: Unit) -> InventoryItem {
    InventoryItem {
        id: id.into(),
        name: name.into(),
        quantity,
        target_quantity,
        unit,
    }
}

fn task(
    id: &str,
    description: &str,
    frequency: Frequency,
    category: Category,
    completed: bool,
) -> ScheduledTask {
    ScheduledTask {
        id: id.into(),
        description: description.into(),
        frequency,
        category,
        completed,
    }
}

impl SampleDataset {
    /// A week of readings on a green pool, its stock and its task list.
    pub fn builtin() -> Self {
        let now = Utc::now();

        let inventory = vec![
            item("1", "Granular Chlorine", 5.0, 10.0, Unit::Mass),
            item("2", "Muriatic Acid", 10.0, 15.0, Unit::Volume),
            item("3", "Algaecide", 2.0, 5.0, Unit::Volume),
            item("4", "Flocculant", 1.0, 3.0, Unit::Volume),
        ];

        let schedule = vec![
            task("t1", "Brush walls and floor", Frequency::Weekly, Category::Cleaning, false),
            task(
                "t2",
                "Wash and rinse the sand filter",
                Frequency::Biweekly,
                Category::Mechanical,
                false,
            ),
            task("t3", "Refill chlorine tablets", Frequency::Weekly, Category::Chemical, false),
            task("t4", "Clean pump basket", Frequency::Weekly, Category::Mechanical, true),
            task("t5", "Vacuum the floor", Frequency::Weekly, Category::Cleaning, false),
            task(
                "t6",
                "Check water level (evaporation)",
                Frequency::Daily,
                Category::Cleaning,
                true,
            ),
        ];

        // Oldest to newest, one reading per day.
        let week = [
            (7.2, 1.5, WaterState::Clear),
            (7.4, 1.2, WaterState::Clear),
            (7.8, 0.9, WaterState::Cloudy),
            (8.2, 0.6, WaterState::Green),
            (8.0, 0.8, WaterState::Green),
            (7.6, 1.0, WaterState::Cloudy),
            (8.2, 0.5, WaterState::Green),
        ];
        let measurements: Vec<Measurement> = week
            .iter()
            .rev()
            .zip(0..)
            .map(|(&(ph, chlorine, state), days_ago)| {
                Measurement::at(ph, chlorine, state, now - Duration::days(days_ago))
            })
            .collect();

        let logs = vec![
            MaintenanceLogEntry {
                id: "1".into(),
                date: now - Duration::days(1),
                actions: vec!["Floor cleaning".into(), "Backwash".into()],
                chemicals_added: vec![ChemicalAddition {
                    name: "Chlorine".into(),
                    amount: 0.5,
                    unit: "kg".into(),
                }],
                notes: None,
            },
            MaintenanceLogEntry {
                id: "2".into(),
                date: now - Duration::days(2),
                actions: vec!["Routine measurement".into()],
                chemicals_added: Vec::new(),
                notes: None,
            },
        ];

        Self {
            inventory,
            schedule,
            measurements,
            logs,
        }
    }
}

/// `SyncGateway` over a [`SampleDataset`] behind a mutex.
#[derive(Debug, Default)]
pub struct SampleGateway {
    tables: Mutex<SampleDataset>,
}

impl SampleGateway {
    pub fn new(dataset: SampleDataset) -> Self {
        Self {
            tables: Mutex::new(dataset),
        }
    }

    pub fn builtin() -> Self {
        Self::new(SampleDataset::builtin())
    }

    /// Copy of the current tables.
    pub fn snapshot(&self) -> SampleDataset {
        self.tables().clone()
    }

    fn tables(&self) -> MutexGuard<'_, SampleDataset> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SyncGateway for SampleGateway {
    fn backend_tag(&self) -> &'static str {
        "sample"
    }

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, CoreError> {
        Ok(self.tables().inventory.clone())
    }

    async fn list_schedule(&self) -> Result<Vec<ScheduledTask>, CoreError> {
        Ok(self.tables().schedule.clone())
    }

    async fn list_recent_measurements(
        &self,
        limit: usize,
    ) -> Result<Vec<Measurement>, CoreError> {
        Ok(self.tables().measurements.iter().take(limit).cloned().collect())
    }

    async fn insert_measurement(&self, measurement: &Measurement) -> Result<(), CoreError> {
        self.tables().measurements.insert(0, measurement.clone());
        Ok(())
    }

    async fn insert_task(&self, task: &ScheduledTask) -> Result<ScheduledTask, CoreError> {
        self.tables().schedule.insert(0, task.clone());
        Ok(task.clone())
    }

    async fn update_task_completed(&self, id: &str, completed: bool) -> Result<(), CoreError> {
        if let Some(task) = self.tables().schedule.iter_mut().find(|t| t.id == id) {
            task.completed = completed;
        }
        Ok(())
    }

    async fn upsert_inventory_item(&self, item: &InventoryItem) -> Result<(), CoreError> {
        let mut tables = self.tables();
        match tables.inventory.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => tables.inventory.push(item.clone()),
        }
        Ok(())
    }

    async fn delete_inventory_item(&self, id: &str) -> Result<(), CoreError> {
        self.tables().inventory.retain(|i| i.id != id);
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<(), CoreError> {
        self.tables().schedule.retain(|t| t.id != id);
        Ok(())
    }

    async fn list_maintenance_log(
        &self,
        limit: usize,
    ) -> Result<Vec<MaintenanceLogEntry>, CoreError> {
        Ok(self.tables().logs.iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_latest_reading_is_green() {
        let data = SampleDataset::builtin();
        let latest = &data.measurements[0];
        assert_eq!(latest.water_state, WaterState::Green);
        assert!((latest.ph - 8.2).abs() < f64::EPSILON);
        assert!((latest.chlorine - 0.5).abs() < f64::EPSILON);
        assert!(data.measurements.windows(2).all(|w| w[0].taken_at > w[1].taken_at));
        assert_eq!(data.inventory.len(), 4);
        assert_eq!(data.schedule.len(), 6);
    }

    #[tokio::test]
    async fn writes_are_visible_to_later_reads() {
        let gw = SampleGateway::builtin();

        gw.update_task_completed("t1", true).await.ok();
        gw.delete_inventory_item("4").await.ok();
        gw.upsert_inventory_item(&item("1", "Granular Chlorine", 7.5, 10.0, Unit::Mass))
            .await
            .ok();

        let snapshot = gw.snapshot();
        assert!(snapshot.schedule.iter().any(|t| t.id == "t1" && t.completed));
        assert_eq!(snapshot.inventory.len(), 3);
        assert!((snapshot.inventory[0].quantity - 7.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn measurement_listing_respects_limit() {
        let gw = SampleGateway::builtin();
        let recent = gw.list_recent_measurements(3).await.unwrap_or_default();
        assert_eq!(recent.len(), 3);

        gw.insert_measurement(&Measurement::new(7.4, 1.5, WaterState::Clear))
            .await
            .ok();
        let recent = gw.list_recent_measurements(1).await.unwrap_or_default();
        assert_eq!(recent[0].water_state, WaterState::Clear);
    }
}
