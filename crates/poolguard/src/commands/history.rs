//! History command: recent readings plus the pH trend.

use serde::Serialize;
use tabled::Tabled;

use poolguard_core::{Measurement, PhTrend, Session};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::{self, Palette};

#[derive(Tabled)]
struct ReadingRow {
    #[tabled(rename = "Measured")]
    taken_at: String,
    #[tabled(rename = "pH")]
    ph: String,
    #[tabled(rename = "Chlorine")]
    chlorine: String,
    #[tabled(rename = "Water")]
    water: String,
}

impl From<&Measurement> for ReadingRow {
    fn from(m: &Measurement) -> Self {
        Self {
            taken_at: m.taken_at.format("%Y-%m-%d %H:%M").to_string(),
            ph: format!("{:.1}", m.ph),
            chlorine: format!("{:.1}", m.chlorine),
            water: m.water_state.to_string(),
        }
    }
}

#[derive(Serialize)]
struct HistoryView<'a> {
    measurements: &'a [Measurement],
    trend: Option<PhTrend>,
}

pub fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let history = session.history();
    let trend = session.ph_trend();

    let out = match global.output {
        OutputFormat::Table => {
            let table = output::render_list(
                &global.output,
                history,
                |m| ReadingRow::from(m),
                |m| m.taken_at.to_rfc3339(),
            )?;
            match trend {
                Some(t) => format!("{table}\n{}", trend_line(&t, Palette::new(&global.color))),
                None => table,
            }
        }
        OutputFormat::Plain => output::render_list(
            &global.output,
            history,
            |m| ReadingRow::from(m),
            |m| format!("{:.1}", m.ph),
        )?,
        _ => output::render_single(
            &global.output,
            &HistoryView {
                measurements: history,
                trend,
            },
            |_| String::new(),
            |_| String::new(),
        )?,
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

fn trend_line(trend: &PhTrend, palette: Palette) -> String {
    let drift = trend.drift();
    let arrow = if drift > 0.05 {
        palette.warn("↑ rising")
    } else if drift < -0.05 {
        palette.good("↓ falling")
    } else {
        "→ steady".to_owned()
    };
    format!(
        "pH over {} readings: min {:.1}, max {:.1}, mean {:.2}, {arrow}",
        trend.samples, trend.min, trend.max, trend.mean
    )
}
