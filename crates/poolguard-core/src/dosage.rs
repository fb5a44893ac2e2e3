// ── Dosage calculator ──
//
// Pure functions from chemistry readings to chemical quantities for a pool
// of fixed volume. All rates are configurable through `DosageConstants`.

use serde::{Deserialize, Serialize};

use crate::model::Measurement;

/// Rates and volume the dosage formulas use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DosageConstants {
    /// Pool volume V in cubic metres.
    pub pool_volume_m3: f64,
    /// Acid (ml) per `ph_volume_unit_m3` per `ph_step` of reduction.
    pub ph_down_ml_per_step: f64,
    /// pH reduction one step of acid achieves.
    pub ph_step: f64,
    /// Volume the acid rate is quoted against.
    pub ph_volume_unit_m3: f64,
    /// Shock chlorine, grams per cubic metre.
    pub chlorine_shock_g_per_m3: f64,
    /// Shock algaecide, millilitres per cubic metre.
    pub algaecide_shock_ml_per_m3: f64,
    /// pH the dosage plan aims for.
    pub target_ph: f64,
}

impl Default for DosageConstants {
    fn default() -> Self {
        Self {
            pool_volume_m3: 70.0,
            ph_down_ml_per_step: 100.0,
            ph_step: 0.1,
            ph_volume_unit_m3: 10.0,
            chlorine_shock_g_per_m3: 20.0,
            algaecide_shock_ml_per_m3: 20.0,
            target_ph: 7.2,
        }
    }
}

/// Dosage formulas bound to a set of constants.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DosageCalculator {
    constants: DosageConstants,
}

impl DosageCalculator {
    pub fn new(constants: DosageConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &DosageConstants {
        &self.constants
    }

    /// Millilitres of acid to bring `current` pH down to `target`.
    ///
    /// Zero when the water is already at or below target. Not rounded.
    pub fn ph_down_dose(&self, current: f64, target: f64) -> f64 {
        let diff = current - target;
        if diff <= 0.0 || diff.is_nan() {
            return 0.0;
        }
        let c = &self.constants;
        (diff / c.ph_step) * (c.pool_volume_m3 / c.ph_volume_unit_m3) * c.ph_down_ml_per_step
    }

    /// Grams of shock chlorine for the whole pool.
    pub fn chlorine_shock_dose(&self) -> f64 {
        self.constants.pool_volume_m3 * self.constants.chlorine_shock_g_per_m3
    }

    /// Millilitres of algaecide for an initial green-water dose.
    pub fn algaecide_shock_dose(&self) -> f64 {
        self.constants.pool_volume_m3 * self.constants.algaecide_shock_ml_per_m3
    }

    /// All three doses for a reading, aiming at the configured target pH.
    pub fn plan(&self, measurement: &Measurement) -> DosagePlan {
        self.plan_for(measurement.ph, self.constants.target_ph)
    }

    /// All three doses for an explicit current/target pH pair.
    pub fn plan_for(&self, current_ph: f64, target_ph: f64) -> DosagePlan {
        DosagePlan {
            current_ph,
            target_ph,
            ph_down_ml: self.ph_down_dose(current_ph, target_ph),
            chlorine_shock_g: self.chlorine_shock_dose(),
            algaecide_shock_ml: self.algaecide_shock_dose(),
        }
    }
}

/// Quantities to add, in base units (ml and g).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DosagePlan {
    pub current_ph: f64,
    pub target_ph: f64,
    pub ph_down_ml: f64,
    pub chlorine_shock_g: f64,
    pub algaecide_shock_ml: f64,
}

impl DosagePlan {
    /// Acid in litres, one decimal.
    pub fn ph_down_litres(&self) -> f64 {
        round1(self.ph_down_ml / 1000.0)
    }

    /// Shock chlorine in kilograms, one decimal.
    pub fn chlorine_shock_kg(&self) -> f64 {
        round1(self.chlorine_shock_g / 1000.0)
    }

    /// Algaecide in litres, one decimal.
    pub fn algaecide_shock_litres(&self) -> f64 {
        round1(self.algaecide_shock_ml / 1000.0)
    }

    pub fn needs_acid(&self) -> bool {
        self.ph_down_ml > 0.0
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WaterState;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn ph_down_for_default_pool() {
        let calc = DosageCalculator::default();
        assert!(close(calc.ph_down_dose(8.2, 7.2), 7000.0));
        assert!(close(calc.ph_down_dose(7.6, 7.2), 2800.0));
    }

    #[test]
    fn ph_down_is_zero_at_or_below_target() {
        let calc = DosageCalculator::default();
        assert!(calc.ph_down_dose(7.2, 7.2).abs() < f64::EPSILON);
        assert!(calc.ph_down_dose(6.8, 7.2).abs() < f64::EPSILON);
    }

    #[test]
    fn shock_doses_scale_with_volume() {
        let calc = DosageCalculator::default();
        assert!(close(calc.chlorine_shock_dose(), 1400.0));
        assert!(close(calc.algaecide_shock_dose(), 1400.0));

        let small = DosageCalculator::new(DosageConstants {
            pool_volume_m3: 35.0,
            ..DosageConstants::default()
        });
        assert!(close(small.chlorine_shock_dose(), 700.0));
        assert!(close(small.ph_down_dose(8.2, 7.2), 3500.0));
    }

    #[test]
    fn plan_rounds_for_display() {
        let calc = DosageCalculator::default();
        let plan = calc.plan(&Measurement::new(8.2, 0.5, WaterState::Green));

        assert!(plan.needs_acid());
        assert!(close(plan.ph_down_litres(), 7.0));
        assert!(close(plan.chlorine_shock_kg(), 1.4));
        assert!(close(plan.algaecide_shock_litres(), 1.4));
        assert!(close(plan.target_ph, 7.2));
    }
}
