// ── Session ──
//
// Owns the operator's working state: the current reading, stock, task list,
// maintenance history and UI flags. Every mutation is applied locally first
// and then mirrored through the gateway. A failed write raises
// `sync_failed` and leaves the local change in place. When the store cannot
// be read on load, the session swaps in a sample gateway so later writes
// never reach the store.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::advisory::{Advisor, AdvisoryService};
use crate::config::SessionConfig;
use crate::dosage::{DosageCalculator, DosagePlan};
use crate::error::CoreError;
use crate::gateway::{SampleDataset, SampleGateway, SyncGateway, build_gateway};
use crate::ledger::InventoryLedger;
use crate::model::{
    Category, EditMode, Frequency, InventoryItem, MaintenanceLogEntry, Measurement,
    ScheduledTask, Unit, WaterState,
};
use crate::schedule::TaskSchedule;
use crate::trend::PhTrend;
use crate::water::{self, WaterAssessment};

/// Shown when the advisor is unreachable, misconfigured or errors out.
pub const ADVICE_UNAVAILABLE: &str = "Could not reach the pool advisor.";

/// Shown when the advisor answers with no text.
pub const ADVICE_EMPTY: &str = "No advice could be produced.";

/// Everything fetched from the gateway on load.
struct Snapshot {
    inventory: Vec<InventoryItem>,
    schedule: Vec<ScheduledTask>,
    measurements: Vec<Measurement>,
    logs: Vec<MaintenanceLogEntry>,
}

impl From<SampleDataset> for Snapshot {
    fn from(data: SampleDataset) -> Self {
        Self {
            inventory: data.inventory,
            schedule: data.schedule,
            measurements: data.measurements,
            logs: data.logs,
        }
    }
}

pub struct Session {
    gateway: Arc<dyn SyncGateway>,
    advisor: Option<Arc<dyn Advisor>>,
    calculator: DosageCalculator,
    current: Measurement,
    /// Newest first, capped at `history_limit`.
    history: Vec<Measurement>,
    ledger: InventoryLedger,
    schedule: TaskSchedule,
    logs: Vec<MaintenanceLogEntry>,
    edit_mode: EditMode,
    offline: bool,
    sync_failed: bool,
    last_advice: Option<String>,
    history_limit: usize,
}

impl Session {
    // ── Construction ─────────────────────────────────────────────────

    /// Build the gateway and advisor from config, then load.
    ///
    /// Fails only when a client cannot be constructed (bad CA file and the
    /// like); an unreachable store still yields a session on sample data.
    pub async fn connect(config: &SessionConfig) -> Result<Self, CoreError> {
        let gateway = build_gateway(&config.store)?;
        let advisor = match &config.advisory {
            Some(advisory) => Some(Arc::new(AdvisoryService::new(
                advisory,
                config.site.clone(),
                config.dosage.pool_volume_m3,
            )?) as Arc<dyn Advisor>),
            None => None,
        };
        Ok(Self::load(gateway, advisor, config).await)
    }

    /// Load state through `gateway`, falling back to the sample dataset
    /// when the store cannot be read.
    pub async fn load(
        gateway: Arc<dyn SyncGateway>,
        advisor: Option<Arc<dyn Advisor>>,
        config: &SessionConfig,
    ) -> Self {
        let history_limit = usize::try_from(config.history_limit).unwrap_or(usize::MAX);
        let log_limit = usize::try_from(config.log_limit).unwrap_or(usize::MAX);

        let fetched = Self::fetch(gateway.as_ref(), history_limit, log_limit).await;
        let (gateway, snapshot, offline) = match fetched {
            Ok(snapshot) => {
                info!(backend = gateway.backend_tag(), "session loaded");
                (gateway, snapshot, false)
            }
            Err(e) => {
                let backend = gateway.backend_tag();
                if e.is_connectivity() {
                    warn!(backend, error = %e, "store unreachable, using sample data");
                } else {
                    warn!(backend, error = %e, "store read failed, using sample data");
                }
                // Writes stay in memory from here on.
                let dataset = SampleDataset::builtin();
                let snapshot = Snapshot::from(dataset.clone());
                let sample: Arc<dyn SyncGateway> = Arc::new(SampleGateway::new(dataset));
                (sample, snapshot, true)
            }
        };

        let mut history = snapshot.measurements;
        history.truncate(history_limit);
        let current = history.first().cloned().unwrap_or_else(Measurement::neutral);

        Self {
            gateway,
            advisor,
            calculator: DosageCalculator::new(config.dosage),
            current,
            history,
            ledger: InventoryLedger::new(snapshot.inventory),
            schedule: TaskSchedule::new(snapshot.schedule),
            logs: snapshot.logs,
            edit_mode: EditMode::Normal,
            offline,
            sync_failed: false,
            last_advice: None,
            history_limit,
        }
    }

    async fn fetch(
        gateway: &dyn SyncGateway,
        history_limit: usize,
        log_limit: usize,
    ) -> Result<Snapshot, CoreError> {
        // The maintenance log is optional; only the core tables decide the fallback.
        let (tables, logs) = tokio::join!(
            async {
                tokio::try_join!(
                    gateway.list_inventory(),
                    gateway.list_schedule(),
                    gateway.list_recent_measurements(history_limit),
                )
            },
            gateway.list_maintenance_log(log_limit),
        );
        let (inventory, schedule, measurements) = tables?;
        let logs = logs.unwrap_or_else(|e| {
            warn!(error = %e, "maintenance log unavailable");
            Vec::new()
        });
        debug!(
            items = inventory.len(),
            tasks = schedule.len(),
            readings = measurements.len(),
            logs = logs.len(),
            "fetched store snapshot"
        );
        Ok(Snapshot {
            inventory,
            schedule,
            measurements,
            logs,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn measurement(&self) -> &Measurement {
        &self.current
    }

    /// Recent readings, newest first.
    pub fn history(&self) -> &[Measurement] {
        &self.history
    }

    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    pub fn schedule(&self) -> &TaskSchedule {
        &self.schedule
    }

    /// Maintenance log, newest first.
    pub fn logs(&self) -> &[MaintenanceLogEntry] {
        &self.logs
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    /// `true` when loading fell back to the sample dataset.
    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// `true` when the most recent remote write failed.
    pub fn sync_failed(&self) -> bool {
        self.sync_failed
    }

    pub fn last_advice(&self) -> Option<&str> {
        self.last_advice.as_deref()
    }

    pub fn backend_tag(&self) -> &'static str {
        self.gateway.backend_tag()
    }

    pub fn calculator(&self) -> &DosageCalculator {
        &self.calculator
    }

    pub fn has_advisor(&self) -> bool {
        self.advisor.is_some()
    }

    // ── Derived views ────────────────────────────────────────────────

    pub fn dosage_plan(&self) -> DosagePlan {
        self.calculator.plan(&self.current)
    }

    pub fn assessment(&self) -> WaterAssessment {
        water::assess(&self.current)
    }

    pub fn shortages(&self) -> Vec<&InventoryItem> {
        self.ledger.shortages()
    }

    pub fn ph_trend(&self) -> Option<PhTrend> {
        PhTrend::from_measurements(&self.history)
    }

    // ── Sync bookkeeping ─────────────────────────────────────────────

    fn note_sync(&mut self, operation: &str, result: Result<(), CoreError>) {
        match result {
            Ok(()) => {
                debug!(operation, "synced");
                self.sync_failed = false;
            }
            Err(e) => {
                warn!(operation, error = %e, "sync failed, keeping local change");
                self.sync_failed = true;
            }
        }
    }

    // ── Measurements ─────────────────────────────────────────────────

    /// Replace the current reading and append it to the store's log.
    pub async fn record_measurement(
        &mut self,
        ph: f64,
        chlorine: f64,
        water_state: WaterState,
    ) -> &Measurement {
        let measurement = Measurement::new(ph, chlorine, water_state);
        self.history.insert(0, measurement.clone());
        self.history.truncate(self.history_limit.max(1));

        let result = self.gateway.insert_measurement(&measurement).await;
        self.current = measurement;
        self.note_sync("insert_measurement", result);
        &self.current
    }

    // ── Inventory ────────────────────────────────────────────────────

    pub async fn adjust_quantity(&mut self, id: &str, delta: f64) -> Option<InventoryItem> {
        let item = self.ledger.adjust_quantity(id, delta)?.clone();
        let result = self.gateway.upsert_inventory_item(&item).await;
        self.note_sync("adjust_quantity", result);
        Some(item)
    }

    pub async fn adjust_target(&mut self, id: &str, delta: f64) -> Option<InventoryItem> {
        let item = self.ledger.adjust_target(id, delta)?.clone();
        let result = self.gateway.upsert_inventory_item(&item).await;
        self.note_sync("adjust_target", result);
        Some(item)
    }

    pub async fn add_item(
        &mut self,
        name: &str,
        quantity: f64,
        target_quantity: f64,
        unit: Unit,
    ) -> InventoryItem {
        let item = self
            .ledger
            .add_item(name, quantity, target_quantity, unit)
            .clone();
        let result = self.gateway.upsert_inventory_item(&item).await;
        self.note_sync("add_item", result);
        item
    }

    pub async fn remove_item(&mut self, id: &str) -> Option<InventoryItem> {
        let removed = self.ledger.remove_item(id)?;
        let result = self.gateway.delete_inventory_item(&removed.id).await;
        self.note_sync("remove_item", result);
        Some(removed)
    }

    // ── Schedule ─────────────────────────────────────────────────────

    pub fn set_edit_mode(&mut self, mode: EditMode) {
        self.edit_mode = mode;
    }

    /// Prepend a task. Blank descriptions are ignored.
    ///
    /// If the store assigns its own id, the local copy adopts it.
    pub async fn add_task(
        &mut self,
        description: &str,
        frequency: Frequency,
        category: Category,
    ) -> Option<ScheduledTask> {
        let task = self
            .schedule
            .add_task(description, frequency, category)?
            .clone();

        match self.gateway.insert_task(&task).await {
            Ok(stored) => {
                self.sync_failed = false;
                if stored.id == task.id {
                    return Some(task);
                }
                debug!(local = %task.id, stored = %stored.id, "store assigned task id");
                self.schedule.reassign_id(&task.id, &stored.id);
                Some(ScheduledTask {
                    id: stored.id,
                    ..task
                })
            }
            Err(e) => {
                self.note_sync("add_task", Err(e));
                Some(task)
            }
        }
    }

    /// Flip a task's completion flag under the current edit mode.
    pub async fn toggle_task(&mut self, id: &str) -> Option<bool> {
        let completed = self.schedule.toggle_completed(id, self.edit_mode)?;
        let result = self.gateway.update_task_completed(id, completed).await;
        self.note_sync("toggle_task", result);
        Some(completed)
    }

    pub async fn remove_task(&mut self, id: &str) -> Option<ScheduledTask> {
        let removed = self.schedule.remove_task(id)?;
        let result = self.gateway.delete_task(&removed.id).await;
        self.note_sync("remove_task", result);
        Some(removed)
    }

    // ── Advice ───────────────────────────────────────────────────────

    /// Ask the advisor about the current reading and stock.
    ///
    /// Never fails: errors become a fixed message. The result is cached.
    pub async fn request_advice(&mut self) -> String {
        let advice = match &self.advisor {
            None => {
                warn!("no advisor configured");
                ADVICE_UNAVAILABLE.to_owned()
            }
            Some(advisor) => {
                match advisor
                    .get_advice(&self.current.status(), self.ledger.items())
                    .await
                {
                    Ok(text) if text.trim().is_empty() => ADVICE_EMPTY.to_owned(),
                    Ok(text) => text,
                    Err(CoreError::Advisory { empty: true, .. }) => ADVICE_EMPTY.to_owned(),
                    Err(e) => {
                        warn!(error = %e, "advice request failed");
                        ADVICE_UNAVAILABLE.to_owned()
                    }
                }
            }
        };
        self.last_advice = Some(advice.clone());
        advice
    }
}
