//! Advice command: ask the language model for a treatment plan.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use poolguard_core::Session;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct AdviceView<'a> {
    advice: &'a str,
}

/// Spinner on stderr while a slow call runs; hidden when not interactive.
fn spinner(message: &str, quiet: bool) -> Option<ProgressBar> {
    if quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let bar = ProgressBar::new_spinner();
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_owned());
    Some(bar)
}

pub async fn handle(session: &mut Session, global: &GlobalOpts) -> Result<(), CliError> {
    if !session.has_advisor() {
        output::notice(
            "No advisory API key configured. Run: poolguard config set-key advisory",
            global.quiet,
        );
    }

    let bar = spinner("Asking the pool advisor…", global.quiet);
    let advice = session.request_advice().await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let out = output::render_single(
        &global.output,
        &AdviceView { advice: &advice },
        |v| v.advice.to_owned(),
        |v| v.advice.to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
