// Measurement log endpoints

use tracing::debug;

use super::client::TableClient;
use super::rows::{MeasurementRow, NewMeasurement, tables};
use crate::error::Error;

impl TableClient {
    /// Most recent readings, newest first.
    ///
    /// `GET /measurements?select=*&order=created_at.desc&limit={limit}`
    pub async fn list_recent_measurements(
        &self,
        limit: usize,
    ) -> Result<Vec<MeasurementRow>, Error> {
        debug!(limit, "listing recent measurements");
        self.select(
            tables::MEASUREMENTS,
            &[
                ("select", "*".into()),
                ("order", "created_at.desc".into()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    /// Append a reading to the log.
    ///
    /// `POST /measurements` with `Prefer: return=representation`
    pub async fn insert_measurement(
        &self,
        measurement: &NewMeasurement,
    ) -> Result<Option<MeasurementRow>, Error> {
        debug!(
            ph = measurement.ph,
            chlorine = measurement.chlorine,
            "inserting measurement"
        );
        let created: Vec<MeasurementRow> =
            self.insert(tables::MEASUREMENTS, measurement).await?;
        Ok(created.into_iter().next())
    }
}
