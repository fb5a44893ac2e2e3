// ── Water-state assessment ──
//
// The state itself is operator-selected; this module only derives the
// warnings a display layer reacts to.

use serde::Serialize;

use crate::model::{Measurement, WaterState};

/// pH above which green water gets an explicit warning.
pub const GREEN_PH_WARNING_THRESHOLD: f64 = 7.6;

/// Chlorine (ppm) below which the reading is flagged as low.
pub const LOW_CHLORINE_THRESHOLD: f64 = 1.0;

/// `true` when green water coincides with a pH that feeds algae growth.
pub fn ph_warning(state: WaterState, ph: f64) -> bool {
    state == WaterState::Green && ph > GREEN_PH_WARNING_THRESHOLD
}

/// Derived view of a reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterAssessment {
    pub state: WaterState,
    pub advisory: &'static str,
    pub ph_warning: bool,
    pub ph_high: bool,
    pub chlorine_low: bool,
}

impl WaterAssessment {
    pub fn warning_message(&self, ph: f64) -> Option<String> {
        self.ph_warning
            .then(|| format!("Green water detected. A pH of {ph} is feeding algae growth."))
    }
}

pub fn assess(measurement: &Measurement) -> WaterAssessment {
    WaterAssessment {
        state: measurement.water_state,
        advisory: measurement.water_state.advisory(),
        ph_warning: ph_warning(measurement.water_state, measurement.ph),
        ph_high: measurement.ph > GREEN_PH_WARNING_THRESHOLD,
        chlorine_low: measurement.chlorine < LOW_CHLORINE_THRESHOLD,
    }
}
