// ── Maintenance history ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chemical dose recorded against a log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalAddition {
    pub name: String,
    pub amount: f64,
    /// Free-form unit as written by whoever logged it.
    pub unit: String,
}

/// One visit's worth of work. Read-only in the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceLogEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub actions: Vec<String>,
    pub chemicals_added: Vec<ChemicalAddition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
