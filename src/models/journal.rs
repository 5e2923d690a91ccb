use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

use super::validation::{optional_text, validate_journal_scores, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: String,
    pub date: NaiveDate,
    pub mood: i32,
    pub fatigue: i32,
    pub sleep_quality: i32,
    pub symptoms: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values written for a user's day. Every field replaces the stored one,
/// including `None` for the optional texts.
#[derive(Debug, Clone)]
pub struct UpsertJournalEntry {
    pub user_id: String,
    pub date: NaiveDate,
    pub mood: i32,
    pub fatigue: i32,
    pub sleep_quality: i32,
    pub symptoms: Option<String>,
    pub notes: Option<String>,
}

/// A validated journal submission for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalSubmission {
    pub mood: i32,
    pub fatigue: i32,
    pub sleep_quality: i32,
    pub symptoms: Option<String>,
    pub notes: Option<String>,
}

impl JournalSubmission {
    /// Parse a `{mood, fatigue, sleepQuality, symptoms?, notes?}` body.
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, ValidationError> {
        let scores = validate_journal_scores(body)?;

        Ok(Self {
            mood: scores.mood,
            fatigue: scores.fatigue,
            sleep_quality: scores.sleep_quality,
            symptoms: optional_text(body, "symptoms")?,
            notes: optional_text(body, "notes")?,
        })
    }
}
