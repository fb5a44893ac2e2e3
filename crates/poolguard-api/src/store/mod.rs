// Table store client (PostgREST / Supabase REST)

pub mod client;
mod inventory;
mod logs;
mod measurements;
pub mod rows;
mod schedule;

pub use client::TableClient;
pub use rows::{
    ChemicalRow, InventoryRow, MaintenanceLogRow, MeasurementRow, NewMeasurement, ScheduleRow,
    TaskCompletedPatch,
};
