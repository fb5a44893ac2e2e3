// poolguard-core: Domain logic and session state between poolguard-api and the CLI.

pub mod advisory;
pub mod config;
pub mod convert;
pub mod dosage;
pub mod error;
pub mod gateway;
pub mod ledger;
pub mod model;
pub mod schedule;
pub mod session;
pub mod trend;
pub mod water;

// ── Primary re-exports ──────────────────────────────────────────────
pub use advisory::{Advisor, AdvisoryService};
pub use config::{
    AdvisoryConfig, ClimateFactors, SessionConfig, SiteProfile, StoreBackend, TlsVerification,
};
pub use dosage::{DosageCalculator, DosageConstants, DosagePlan};
pub use error::CoreError;
pub use gateway::{LiveGateway, SampleDataset, SampleGateway, SyncGateway, build_gateway};
pub use ledger::InventoryLedger;
pub use schedule::TaskSchedule;
pub use session::{ADVICE_EMPTY, ADVICE_UNAVAILABLE, Session};
pub use trend::PhTrend;
pub use water::WaterAssessment;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Category, ChemicalAddition, EditMode, Frequency, InventoryItem, MaintenanceLogEntry,
    Measurement, PoolStatus, ScheduledTask, Unit, WaterState,
};
