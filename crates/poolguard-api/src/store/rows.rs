// Row shapes for the table store.
//
// These mirror the remote schema (snake_case columns, string enum tags).
// `poolguard-core` converts them into typed domain values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Table names used by the store endpoints.
pub mod tables {
    pub const INVENTORY: &str = "inventory";
    pub const SCHEDULE: &str = "schedule";
    pub const MEASUREMENTS: &str = "measurements";
    pub const MAINTENANCE_LOGS: &str = "maintenance_logs";
}

/// Accept either a JSON string or number for an id column.
///
/// Hosted tables frequently use `bigint` identity keys while seeded rows
/// use text ids; both end up as strings here.
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

fn optional_id_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "id_string")] String);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|w| w.0))
}

// ── inventory ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRow {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub target_quantity: f64,
    /// `"kg"`, `"L"` or `"units"`.
    pub unit: String,
}

// ── schedule ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Task description.
    pub task: String,
    /// `"daily"`, `"weekly"`, `"biweekly"` or `"monthly"`.
    pub frequency: String,
    /// `"cleaning"`, `"mechanical"` or `"chemical"`.
    pub category: String,
    #[serde(default)]
    pub completed: bool,
}

/// Body for flipping a task's completion flag.
#[derive(Debug, Clone, Serialize)]
pub struct TaskCompletedPatch {
    pub completed: bool,
}

// ── measurements ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRow {
    #[serde(default, deserialize_with = "optional_id_string")]
    pub id: Option<String>,
    pub ph: f64,
    pub chlorine: f64,
    /// `"clear"`, `"cloudy"`, `"green"` or `"algae"`.
    pub water_state: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert body for a new reading; the store assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewMeasurement {
    pub ph: f64,
    pub chlorine: f64,
    pub water_state: String,
    pub created_at: DateTime<Utc>,
}

// ── maintenance_logs ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalRow {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceLogRow {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub chemicals_added: Vec<ChemicalRow>,
    #[serde(default)]
    pub notes: Option<String>,
}
