//! Command dispatch: bridges CLI args -> session operations -> output formatting.

pub mod advice;
pub mod config_cmd;
pub mod dose;
pub mod history;
pub mod log;
pub mod status;
pub mod stock;
pub mod tasks;
pub mod util;

use poolguard_core::Session;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a session-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    session: &mut Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status(args) => status::handle(session, args, global).await,
        Command::Dose(args) => dose::handle(session, &args, global),
        Command::History => history::handle(session, global),
        Command::Stock(args) => stock::handle(session, args, global).await,
        Command::Tasks(args) => tasks::handle(session, args, global).await,
        Command::Log => log::handle(session, global),
        Command::Advice => advice::handle(session, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions run without a session".into(),
        )),
    }
}
