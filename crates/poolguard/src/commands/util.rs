//! Shared helpers for command handlers.

use std::io::IsTerminal;

use poolguard_core::{Category, EditMode, Frequency, Session, Unit, WaterState};

use crate::cli::{CategoryArg, EditModeArg, FrequencyArg, GlobalOpts, UnitArg, WaterArg};
use crate::error::CliError;
use crate::output;

// ── Arg → domain conversions ────────────────────────────────────────

impl From<WaterArg> for WaterState {
    fn from(arg: WaterArg) -> Self {
        match arg {
            WaterArg::Clear => Self::Clear,
            WaterArg::Cloudy => Self::Cloudy,
            WaterArg::Green => Self::Green,
            WaterArg::Algae => Self::Algae,
        }
    }
}

impl From<UnitArg> for Unit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Kg => Self::Mass,
            UnitArg::Litres => Self::Volume,
            UnitArg::Units => Self::Count,
        }
    }
}

impl From<FrequencyArg> for Frequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::Daily => Self::Daily,
            FrequencyArg::Weekly => Self::Weekly,
            FrequencyArg::Biweekly => Self::Biweekly,
            FrequencyArg::Monthly => Self::Monthly,
        }
    }
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Cleaning => Self::Cleaning,
            CategoryArg::Mechanical => Self::Mechanical,
            CategoryArg::Chemical => Self::Chemical,
        }
    }
}

impl From<EditModeArg> for EditMode {
    fn from(arg: EditModeArg) -> Self {
        match arg {
            EditModeArg::Normal => Self::Normal,
            EditModeArg::Configuring => Self::Configuring,
        }
    }
}

// ── Argument checks ─────────────────────────────────────────────────

/// Reject `NaN` and infinities before they reach the ledger or the store.
pub fn require_finite(field: &str, value: f64) -> Result<f64, CliError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CliError::Validation {
            field: field.into(),
            reason: "must be a number".into(),
        })
    }
}

// ── Lookups ─────────────────────────────────────────────────────────

/// Resolve a stock item by id or name to its id.
pub fn resolve_item_id(session: &Session, key: &str) -> Result<String, CliError> {
    session
        .ledger()
        .find(key)
        .map(|item| item.id.clone())
        .ok_or_else(|| CliError::NotFound {
            resource_type: "stock item".into(),
            identifier: key.into(),
            list_command: "stock list".into(),
        })
}

/// Ensure a task id exists.
pub fn require_task(session: &Session, id: &str) -> Result<(), CliError> {
    if session.schedule().get(id).is_some() {
        Ok(())
    } else {
        Err(CliError::NotFound {
            resource_type: "task".into(),
            identifier: id.into(),
            list_command: "tasks list".into(),
        })
    }
}

// ── Interaction ─────────────────────────────────────────────────────

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Warn when the last write only landed locally.
pub fn report_sync(session: &Session, global: &GlobalOpts) {
    if session.sync_failed() {
        output::notice(
            "⚠ Saved locally, but the table store could not be updated",
            global.quiet,
        );
    }
}
