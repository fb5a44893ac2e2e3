// ── Water chemistry readings ──

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Range the pH probe reports.
pub const PH_RANGE: RangeInclusive<f64> = 6.5..=8.5;

/// Free chlorine range in ppm.
pub const CHLORINE_RANGE: RangeInclusive<f64> = 0.0..=5.0;

/// Operator-observed condition of the water.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WaterState {
    Clear,
    Cloudy,
    Green,
    Algae,
}

impl WaterState {
    /// One line of guidance shown next to the state.
    pub fn advisory(self) -> &'static str {
        match self {
            Self::Clear => "Water is clear. Keep the regular chlorine and pH routine.",
            Self::Cloudy => {
                "Cloudy water. Check filter run time and consider a flocculant dose."
            }
            Self::Green => {
                "Green water. Shock with chlorine, add algaecide and bring pH down to target."
            }
            Self::Algae => {
                "Visible algae. Brush walls and floor, then shock chlorinate and dose algaecide."
            }
        }
    }
}

/// A single chemistry reading.
///
/// Values outside the instrument ranges are clamped on construction, so a
/// `Measurement` always holds `ph` in [`PH_RANGE`] and `chlorine` in
/// [`CHLORINE_RANGE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub ph: f64,
    pub chlorine: f64,
    pub water_state: WaterState,
    pub taken_at: DateTime<Utc>,
}

impl Measurement {
    /// Reading taken now.
    pub fn new(ph: f64, chlorine: f64, water_state: WaterState) -> Self {
        Self::at(ph, chlorine, water_state, Utc::now())
    }

    /// Reading with an explicit timestamp.
    pub fn at(ph: f64, chlorine: f64, water_state: WaterState, taken_at: DateTime<Utc>) -> Self {
        Self {
            ph: clamp_to(ph, &PH_RANGE),
            chlorine: clamp_to(chlorine, &CHLORINE_RANGE),
            water_state,
            taken_at,
        }
    }

    /// Balanced water, used when the store has no readings yet.
    pub fn neutral() -> Self {
        Self::new(7.2, 1.0, WaterState::Clear)
    }

    /// The subset of fields the advisor sees.
    pub fn status(&self) -> PoolStatus {
        PoolStatus {
            ph: self.ph,
            chlorine: self.chlorine,
            water_state: self.water_state,
        }
    }
}

/// Current chemistry as sent to the advisory API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolStatus {
    pub ph: f64,
    pub chlorine: f64,
    pub water_state: WaterState,
}

/// NaN falls to the lower bound.
fn clamp_to(value: f64, range: &RangeInclusive<f64>) -> f64 {
    if value.is_nan() {
        *range.start()
    } else {
        value.clamp(*range.start(), *range.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn readings_are_clamped() {
        let m = Measurement::new(9.4, -1.0, WaterState::Green);
        assert!((m.ph - 8.5).abs() < f64::EPSILON);
        assert!(m.chlorine.abs() < f64::EPSILON);

        let m = Measurement::new(f64::NAN, 12.0, WaterState::Clear);
        assert!((m.ph - 6.5).abs() < f64::EPSILON);
        assert!((m.chlorine - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn in_range_readings_are_untouched() {
        let m = Measurement::new(8.2, 0.5, WaterState::Green);
        assert!((m.ph - 8.2).abs() < f64::EPSILON);
        assert!((m.chlorine - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn water_state_tags_are_lowercase() {
        assert_eq!(WaterState::Algae.to_string(), "algae");
        assert_eq!(WaterState::from_str("Green").ok(), Some(WaterState::Green));
        assert_eq!(
            serde_json::to_string(&WaterState::Cloudy).ok().as_deref(),
            Some("\"cloudy\"")
        );
        assert_eq!(WaterState::iter().count(), 4);
    }

    #[test]
    fn every_state_has_advice() {
        for state in WaterState::iter() {
            assert!(!state.advisory().is_empty());
        }
    }
}
