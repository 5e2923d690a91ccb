use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

use super::calendar::{look_back_start, start_of_day_utc};
use crate::models::{CreateVital, Vital, VitalSource, VitalSubmission};
use crate::store::{RecordStore, StoreResult};

#[derive(Clone)]
pub struct VitalService {
    store: Arc<dyn RecordStore>,
}

impl VitalService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Append a manual measurement taken at `measured_at`. Never merges with
    /// earlier rows.
    pub async fn record(
        &self,
        user_id: &str,
        measured_at: DateTime<Utc>,
        submission: VitalSubmission,
    ) -> StoreResult<Vital> {
        let vital = self
            .store
            .create_vital(CreateVital {
                user_id: user_id.to_string(),
                measured_at,
                systolic: submission.systolic,
                diastolic: submission.diastolic,
                heart_rate: submission.heart_rate,
                weight_kg: submission.weight_kg,
                source: VitalSource::Manual,
            })
            .await?;

        tracing::info!(user_id, vital_id = %vital.id, "Recorded vitals");
        Ok(vital)
    }

    /// Measurements since the start of the day `days` days before `today`,
    /// oldest first.
    pub async fn recent(&self, user_id: &str, today: NaiveDate, days: i64) -> StoreResult<Vec<Vital>> {
        let since = start_of_day_utc(look_back_start(today, days));
        self.store.list_vitals(user_id, since).await
    }

    pub async fn latest(&self, user_id: &str) -> StoreResult<Option<Vital>> {
        self.store.latest_vital(user_id).await
    }
}
