//! Maintenance log command.

use tabled::Tabled;

use poolguard_core::{MaintenanceLogEntry, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Actions")]
    actions: String,
    #[tabled(rename = "Chemicals")]
    chemicals: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl From<&MaintenanceLogEntry> for LogRow {
    fn from(e: &MaintenanceLogEntry) -> Self {
        Self {
            date: e.date.format("%Y-%m-%d").to_string(),
            actions: e.actions.join("\n"),
            chemicals: e
                .chemicals_added
                .iter()
                .map(|c| format!("{} {} {}", c.name, output::fmt_amount(c.amount), c.unit))
                .collect::<Vec<_>>()
                .join("\n"),
            notes: e.notes.clone().unwrap_or_default(),
        }
    }
}

pub fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        session.logs(),
        |e| LogRow::from(e),
        |e| e.id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
