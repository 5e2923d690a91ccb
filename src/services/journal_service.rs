use chrono::NaiveDate;
use std::sync::Arc;

use super::calendar::look_back_start;
use crate::models::{JournalEntry, JournalSubmission, UpsertJournalEntry};
use crate::store::{RecordStore, StoreResult};

#[derive(Clone)]
pub struct JournalService {
    store: Arc<dyn RecordStore>,
}

impl JournalService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Write the user's entry for `date`, replacing any earlier one that day.
    pub async fn record_day(
        &self,
        user_id: &str,
        date: NaiveDate,
        submission: JournalSubmission,
    ) -> StoreResult<JournalEntry> {
        let entry = self
            .store
            .upsert_journal_entry(UpsertJournalEntry {
                user_id: user_id.to_string(),
                date,
                mood: submission.mood,
                fatigue: submission.fatigue,
                sleep_quality: submission.sleep_quality,
                symptoms: submission.symptoms,
                notes: submission.notes,
            })
            .await?;

        tracing::info!(user_id, %date, entry_id = %entry.id, "Recorded journal entry");
        Ok(entry)
    }

    /// Entries from the last `days` days up to `today`, oldest first.
    pub async fn recent_entries(&self, user_id: &str, today: NaiveDate, days: i64) -> StoreResult<Vec<JournalEntry>> {
        let since = look_back_start(today, days);
        self.store.list_journal_entries(user_id, since).await
    }

    pub async fn latest_entry(&self, user_id: &str) -> StoreResult<Option<JournalEntry>> {
        self.store.latest_journal_entry(user_id).await
    }
}
