//! Status command: current reading, water assessment and a summary.

use std::fmt::Write;

use serde::Serialize;

use poolguard_core::{DosagePlan, Measurement, Session, WaterAssessment, WaterState};

use crate::cli::{GlobalOpts, StatusArgs};
use crate::error::CliError;
use crate::output::{self, Palette};

use super::util;

#[derive(Debug, Serialize)]
struct StatusView<'a> {
    backend: &'static str,
    offline: bool,
    sync_failed: bool,
    measurement: &'a Measurement,
    assessment: WaterAssessment,
    dosage: DosagePlan,
    shortages: usize,
    pending_tasks: usize,
}

pub async fn handle(
    session: &mut Session,
    args: StatusArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if args.ph.is_some() || args.chlorine.is_some() || args.water.is_some() {
        let current = session.measurement().clone();
        session
            .record_measurement(
                args.ph.unwrap_or(current.ph),
                args.chlorine.unwrap_or(current.chlorine),
                args.water.map_or(current.water_state, WaterState::from),
            )
            .await;
        util::report_sync(session, global);
    }

    let view = StatusView {
        backend: session.backend_tag(),
        offline: session.is_offline(),
        sync_failed: session.sync_failed(),
        measurement: session.measurement(),
        assessment: session.assessment(),
        dosage: session.dosage_plan(),
        shortages: session.shortages().len(),
        pending_tasks: session.schedule().pending().len(),
    };

    let palette = Palette::new(&global.color);
    let out = output::render_single(
        &global.output,
        &view,
        |v| render_detail(v, palette),
        |v| v.measurement.water_state.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render_detail(v: &StatusView<'_>, palette: Palette) -> String {
    let m = v.measurement;
    let a = &v.assessment;
    let mut out = String::new();

    let state = m.water_state.to_string();
    let state = match m.water_state {
        WaterState::Clear => palette.good(&state),
        WaterState::Cloudy => palette.warn(&state),
        WaterState::Green | WaterState::Algae => palette.bad(&state),
    };
    let ph = format!("{:.1}", m.ph);
    let ph = if a.ph_high { palette.warn(&ph) } else { ph };
    let chlorine = format!("{:.1} ppm", m.chlorine);
    let chlorine = if a.chlorine_low {
        palette.warn(&chlorine)
    } else {
        chlorine
    };

    let _ = writeln!(out, "{}", palette.heading("Pool status"));
    let _ = writeln!(out, "  pH:        {ph}");
    let _ = writeln!(out, "  Chlorine:  {chlorine}");
    let _ = writeln!(out, "  Water:     {state}");
    let _ = writeln!(
        out,
        "  Measured:  {}",
        palette.dim(&m.taken_at.format("%Y-%m-%d %H:%M UTC").to_string())
    );
    let _ = writeln!(out, "\n  {}", a.advisory);
    if let Some(warning) = a.warning_message(m.ph) {
        let _ = writeln!(out, "  {}", palette.bad(&format!("⚠ {warning}")));
    }
    if v.dosage.needs_acid() {
        let _ = writeln!(
            out,
            "  Acid to reach pH {:.1}: {} L",
            v.dosage.target_ph,
            output::fmt_amount(v.dosage.ph_down_litres())
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "  Stock below target: {}", v.shortages);
    let _ = writeln!(out, "  Pending tasks:      {}", v.pending_tasks);
    let _ = write!(
        out,
        "  Backend:            {}{}",
        v.backend,
        if v.offline { " (offline, sample data)" } else { "" }
    );
    out
}
