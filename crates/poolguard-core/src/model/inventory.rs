// ── Chemical stock ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Unit a stock item is counted in. Tags are the literal strings stored
/// in the `unit` column.
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
#[strum(ascii_case_insensitive)]
pub enum Unit {
    #[serde(rename = "kg")]
    #[strum(to_string = "kg", serialize = "kilograms")]
    Mass,
    #[serde(rename = "L")]
    #[strum(to_string = "L", serialize = "liters", serialize = "litres")]
    Volume,
    #[serde(rename = "units")]
    #[strum(to_string = "units", serialize = "unit")]
    Count,
}

/// A tracked chemical or consumable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub target_quantity: f64,
    pub unit: Unit,
}

impl InventoryItem {
    /// How much is missing to reach the target (never negative).
    pub fn shortfall(&self) -> f64 {
        (self.target_quantity - self.quantity).max(0.0)
    }

    pub fn is_short(&self) -> bool {
        self.quantity < self.target_quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn item(quantity: f64, target_quantity: f64) -> InventoryItem {
        InventoryItem {
            id: "1".into(),
            name: "Granular Chlorine".into(),
            quantity,
            target_quantity,
            unit: Unit::Mass,
        }
    }

    #[test]
    fn shortfall_never_negative() {
        assert!((item(5.0, 10.0).shortfall() - 5.0).abs() < f64::EPSILON);
        assert!(item(12.0, 10.0).shortfall().abs() < f64::EPSILON);
        assert!(item(5.0, 10.0).is_short());
        assert!(!item(10.0, 10.0).is_short());
    }

    #[test]
    fn unit_tags_round_trip_through_strum_and_serde() {
        assert_eq!(Unit::Volume.to_string(), "L");
        assert_eq!(Unit::from_str("l").ok(), Some(Unit::Volume));
        assert_eq!(Unit::from_str("KG").ok(), Some(Unit::Mass));
        assert_eq!(
            serde_json::from_str::<Unit>("\"units\"").ok(),
            Some(Unit::Count)
        );
    }
}
