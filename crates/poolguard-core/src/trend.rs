// ── pH trend over recent readings ──

use serde::Serialize;

use crate::model::Measurement;

/// Summary of a newest-first run of readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhTrend {
    pub samples: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// pH of the newest reading.
    pub latest: f64,
}

impl PhTrend {
    /// `None` for an empty slice.
    pub fn from_measurements(measurements: &[Measurement]) -> Option<Self> {
        let latest = measurements.first()?.ph;

        let (min, max, sum) = measurements.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), m| (min.min(m.ph), max.max(m.ph), sum + m.ph),
        );

        #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
        let mean = sum / measurements.len() as f64;

        Some(Self {
            samples: measurements.len(),
            min,
            max,
            mean,
            latest,
        })
    }

    /// `latest - mean`: positive when pH is drifting up.
    pub fn drift(&self) -> f64 {
        self.latest - self.mean
    }
}
