// ── Store row <-> domain conversions ──
//
// Bridges `poolguard_api::store` rows and `poolguard_core::model` types.
// String tags are parsed into enums; unknown tags fall back to the
// enum's default rather than dropping the row.

use std::str::FromStr;

use poolguard_api::store::{
    ChemicalRow, InventoryRow, MaintenanceLogRow, MeasurementRow, NewMeasurement, ScheduleRow,
};

use crate::model::{
    Category, ChemicalAddition, Frequency, InventoryItem, MaintenanceLogEntry, Measurement,
    ScheduledTask, Unit, WaterState,
};

fn parse_tag<T: FromStr>(raw: &str, fallback: T) -> T {
    T::from_str(raw.trim()).unwrap_or(fallback)
}

// ── Inventory ──────────────────────────────────────────────────────

impl From<InventoryRow> for InventoryItem {
    fn from(row: InventoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            quantity: row.quantity.max(0.0),
            target_quantity: row.target_quantity.max(0.0),
            unit: parse_tag(&row.unit, Unit::Count),
        }
    }
}

impl From<&InventoryItem> for InventoryRow {
    fn from(item: &InventoryItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            target_quantity: item.target_quantity,
            unit: item.unit.to_string(),
        }
    }
}

// ── Schedule ───────────────────────────────────────────────────────

impl From<ScheduleRow> for ScheduledTask {
    fn from(row: ScheduleRow) -> Self {
        Self {
            id: row.id,
            description: row.task,
            frequency: parse_tag(&row.frequency, Frequency::default()),
            category: parse_tag(&row.category, Category::default()),
            completed: row.completed,
        }
    }
}

impl From<&ScheduledTask> for ScheduleRow {
    fn from(task: &ScheduledTask) -> Self {
        Self {
            id: task.id.clone(),
            task: task.description.clone(),
            frequency: task.frequency.to_string(),
            category: task.category.to_string(),
            completed: task.completed,
        }
    }
}

// ── Measurements ───────────────────────────────────────────────────

impl From<MeasurementRow> for Measurement {
    /// Rows without a timestamp are dated at the Unix epoch so they sort last.
    fn from(row: MeasurementRow) -> Self {
        Measurement::at(
            row.ph,
            row.chlorine,
            parse_tag(&row.water_state, WaterState::Clear),
            row.created_at.unwrap_or_default(),
        )
    }
}

impl From<&Measurement> for NewMeasurement {
    fn from(m: &Measurement) -> Self {
        Self {
            ph: m.ph,
            chlorine: m.chlorine,
            water_state: m.water_state.to_string(),
            created_at: m.taken_at,
        }
    }
}

// ── Maintenance log ────────────────────────────────────────────────

impl From<ChemicalRow> for ChemicalAddition {
    fn from(row: ChemicalRow) -> Self {
        Self {
            name: row.name,
            amount: row.amount,
            unit: row.unit,
        }
    }
}

impl From<MaintenanceLogRow> for MaintenanceLogEntry {
    fn from(row: MaintenanceLogRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            actions: row.actions,
            chemicals_added: row.chemicals_added.into_iter().map(Into::into).collect(),
            notes: row.notes.filter(|n| !n.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inventory_round_trip_keeps_unit_tag() {
        let row = InventoryRow {
            id: "2".into(),
            name: "Muriatic Acid".into(),
            quantity: 12.0,
            target_quantity: 20.0,
            unit: "L".into(),
        };
        let item = InventoryItem::from(row.clone());
        assert_eq!(item.unit, Unit::Volume);
        assert_eq!(InventoryRow::from(&item), row);
    }

    #[test]
    fn unknown_tags_fall_back() {
        let task = ScheduledTask::from(ScheduleRow {
            id: "9".into(),
            task: "Check salt cell".into(),
            frequency: "quarterly".into(),
            category: "electrical".into(),
            completed: false,
        });
        assert_eq!(task.frequency, Frequency::Weekly);
        assert_eq!(task.category, Category::Cleaning);
    }

    #[test]
    fn stored_measurements_are_clamped() {
        let m = Measurement::from(MeasurementRow {
            id: Some("1".into()),
            ph: 9.9,
            chlorine: 0.4,
            water_state: "green".into(),
            created_at: None,
        });
        assert!((m.ph - 8.5).abs() < f64::EPSILON);
        assert_eq!(m.water_state, WaterState::Green);
        assert_eq!(m.taken_at.timestamp(), 0);
    }

    #[test]
    fn measurement_insert_body_uses_lowercase_state() {
        let m = Measurement::new(7.4, 1.5, WaterState::Cloudy);
        let body = NewMeasurement::from(&m);
        assert_eq!(body.water_state, "cloudy");
        assert_eq!(body.created_at, m.taken_at);
    }
}
