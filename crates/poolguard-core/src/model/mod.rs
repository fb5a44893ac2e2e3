// ── Domain model ──
//
// Canonical representations of the pool's readings, stock, tasks and
// maintenance history. Store rows are converted into these in `convert`.

pub mod inventory;
pub mod log;
pub mod measurement;
pub mod schedule;

// ── Re-exports ──────────────────────────────────────────────────────
pub use inventory::{InventoryItem, Unit};
pub use log::{ChemicalAddition, MaintenanceLogEntry};
pub use measurement::{Measurement, PoolStatus, WaterState};
pub use schedule::{Category, EditMode, Frequency, ScheduledTask};
