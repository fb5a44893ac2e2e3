//! Dose command: acid and shock quantities for a pH reading.

use std::fmt::Write;

use poolguard_core::{DosagePlan, Session};

use crate::cli::{DoseArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Palette};

use super::util;

pub fn handle(session: &Session, args: &DoseArgs, global: &GlobalOpts) -> Result<(), CliError> {
    for (field, value) in [("ph", args.ph), ("target", args.target)] {
        if let Some(value) = value {
            util::require_finite(field, value)?;
        }
    }

    let calculator = session.calculator();
    let plan = calculator.plan_for(
        args.ph.unwrap_or(session.measurement().ph),
        args.target.unwrap_or(calculator.constants().target_ph),
    );
    let volume = calculator.constants().pool_volume_m3;

    let palette = Palette::new(&global.color);
    let out = output::render_single(
        &global.output,
        &plan,
        |p| render_detail(p, volume, palette),
        |p| output::fmt_amount(p.ph_down_ml),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render_detail(plan: &DosagePlan, volume_m3: f64, palette: Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        palette.heading(&format!("Dosage for {} m³", output::fmt_amount(volume_m3)))
    );

    if plan.needs_acid() {
        let _ = writeln!(
            out,
            "  pH down ({:.1} → {:.1}):  {} L  ({} ml)",
            plan.current_ph,
            plan.target_ph,
            output::fmt_amount(plan.ph_down_litres()),
            output::fmt_amount(plan.ph_down_ml),
        );
    } else {
        let _ = writeln!(
            out,
            "  pH down:  {}",
            palette.good(&format!(
                "none needed ({:.1} is at or below {:.1})",
                plan.current_ph, plan.target_ph
            ))
        );
    }

    let _ = writeln!(
        out,
        "  Chlorine shock:  {} kg",
        output::fmt_amount(plan.chlorine_shock_kg())
    );
    let _ = write!(
        out,
        "  Algaecide shock: {} L",
        output::fmt_amount(plan.algaecide_shock_litres())
    );
    out
}
