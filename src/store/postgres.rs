use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{postgres::PgRow, PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use super::{RecordStore, SessionSeed, StoreError, StoreResult};
use crate::models::{
    CreatePhase, CreateProgram, CreateSession, CreateVital, JournalEntry, Phase, Program, Session,
    UpsertJournalEntry, Vital,
};

const PROGRAM_COLUMNS: &str = "id, name, description, total_weeks, is_default, created_at";
const PHASE_COLUMNS: &str = "id, program_id, phase_number, label, start_week, end_week";
const SESSION_COLUMNS: &str = "id, user_id, program_id, phase_number, week_number, date, activity_type, modality, planned_duration_min, intensity_hint, created_at";
const JOURNAL_COLUMNS: &str = "id, user_id, date, mood, fatigue, sleep_quality, symptoms, notes, created_at, updated_at";
const VITAL_COLUMNS: &str = "id, user_id, measured_at, systolic, diastolic, heart_rate, weight_kg, source";

/// PostgreSQL-backed record store.
#[derive(Clone)]
pub struct PostgresStore {
    db: PgPool,
}

impl PostgresStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    fn row_to_session(row: PgRow) -> StoreResult<Session> {
        let activity_type: String = row.try_get("activity_type")?;
        let modality: String = row.try_get("modality")?;

        Ok(Session {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            program_id: row.try_get("program_id")?,
            phase_number: row.try_get("phase_number")?,
            week_number: row.try_get("week_number")?,
            date: row.try_get("date")?,
            activity_type: activity_type.parse().map_err(|reason| StoreError::CorruptRow {
                entity: "session",
                reason,
            })?,
            modality: modality.parse().map_err(|reason| StoreError::CorruptRow {
                entity: "session",
                reason,
            })?,
            planned_duration_min: row.try_get("planned_duration_min")?,
            intensity_hint: row.try_get("intensity_hint")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_vital(row: PgRow) -> StoreResult<Vital> {
        let source: String = row.try_get("source")?;

        Ok(Vital {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            measured_at: row.try_get("measured_at")?,
            systolic: row.try_get("systolic")?,
            diastolic: row.try_get("diastolic")?,
            heart_rate: row.try_get("heart_rate")?,
            weight_kg: row.try_get("weight_kg")?,
            source: source.parse().map_err(|reason| StoreError::CorruptRow {
                entity: "vital",
                reason,
            })?,
        })
    }
}

#[async_trait]
impl RecordStore for PostgresStore {
    async fn ensure_default_program(&self, program: CreateProgram) -> StoreResult<(Program, bool)> {
        let inserted = sqlx::query_as::<_, Program>(&format!(
            r#"
            INSERT INTO programs (id, name, description, total_weeks, is_default, created_at)
            VALUES ($1, $2, $3, $4, TRUE, $5)
            ON CONFLICT (is_default) WHERE is_default DO NOTHING
            RETURNING {PROGRAM_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&program.name)
        .bind(&program.description)
        .bind(program.total_weeks)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;

        if let Some(created) = inserted {
            return Ok((created, true));
        }

        let existing = sqlx::query_as::<_, Program>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs WHERE is_default = TRUE"
        ))
        .fetch_one(&self.db)
        .await?;

        Ok((existing, false))
    }

    async fn find_default_program(&self) -> StoreResult<Option<Program>> {
        let program = sqlx::query_as::<_, Program>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs WHERE is_default = TRUE"
        ))
        .fetch_optional(&self.db)
        .await?;

        Ok(program)
    }

    async fn list_phases(&self, program_id: Uuid) -> StoreResult<Vec<Phase>> {
        let phases = sqlx::query_as::<_, Phase>(&format!(
            "SELECT {PHASE_COLUMNS} FROM phases WHERE program_id = $1 ORDER BY phase_number ASC"
        ))
        .bind(program_id)
        .fetch_all(&self.db)
        .await?;

        Ok(phases)
    }

    async fn create_phases(&self, phases: Vec<CreatePhase>) -> StoreResult<u64> {
        let mut tx = self.db.begin().await?;
        let mut written = 0;

        for phase in &phases {
            let result = sqlx::query(
                r#"
                INSERT INTO phases (id, program_id, phase_number, label, start_week, end_week)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT ON CONSTRAINT phases_program_phase_unique DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(phase.program_id)
            .bind(phase.phase_number)
            .bind(&phase.label)
            .bind(phase.start_week)
            .bind(phase.end_week)
            .execute(&mut *tx)
            .await?;

            written += result.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }

    async fn create_sessions_if_none(
        &self,
        user_id: &str,
        program_id: Uuid,
        sessions: Vec<CreateSession>,
    ) -> StoreResult<SessionSeed> {
        let mut tx = self.db.begin().await?;

        // Serializes concurrent seeding of the same user and program
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(format!("sessions:{}:{}", user_id, program_id))
            .execute(&mut *tx)
            .await?;

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE user_id = $1 AND program_id = $2")
                .bind(user_id)
                .bind(program_id)
                .fetch_one(&mut *tx)
                .await?;

        if existing > 0 {
            tx.commit().await?;
            return Ok(SessionSeed::AlreadyPresent(existing));
        }
        if sessions.is_empty() {
            tx.commit().await?;
            return Ok(SessionSeed::Created(0));
        }

        let now = Utc::now();
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO sessions (id, user_id, program_id, phase_number, week_number, date, activity_type, modality, planned_duration_min, intensity_hint, created_at) ",
        );

        builder.push_values(sessions.iter(), |mut row, session| {
            row.push_bind(Uuid::new_v4())
                .push_bind(session.user_id.clone())
                .push_bind(session.program_id)
                .push_bind(session.phase_number)
                .push_bind(session.week_number)
                .push_bind(session.date)
                .push_bind(session.activity_type.as_str())
                .push_bind(session.modality.as_str())
                .push_bind(session.planned_duration_min)
                .push_bind(session.intensity_hint.clone())
                .push_bind(now);
        });

        let result = builder.build().execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(SessionSeed::Created(result.rows_affected()))
    }

    async fn find_session_on(
        &self,
        user_id: &str,
        program_id: Uuid,
        date: NaiveDate,
    ) -> StoreResult<Option<Session>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {SESSION_COLUMNS} FROM sessions
            WHERE user_id = $1 AND program_id = $2 AND date = $3
            ORDER BY date ASC, created_at ASC
            LIMIT 1
            "#
        ))
        .bind(user_id)
        .bind(program_id)
        .bind(date)
        .fetch_optional(&self.db)
        .await?;

        row.map(Self::row_to_session).transpose()
    }

    async fn list_sessions(
        &self,
        user_id: &str,
        program_id: Uuid,
        week: Option<i32>,
    ) -> StoreResult<Vec<Session>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {SESSION_COLUMNS} FROM sessions
            WHERE user_id = $1 AND program_id = $2 AND ($3::INTEGER IS NULL OR week_number = $3)
            ORDER BY date ASC
            "#
        ))
        .bind(user_id)
        .bind(program_id)
        .bind(week)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(Self::row_to_session).collect()
    }

    async fn upsert_journal_entry(&self, entry: UpsertJournalEntry) -> StoreResult<JournalEntry> {
        let stored = sqlx::query_as::<_, JournalEntry>(&format!(
            r#"
            INSERT INTO journal_entries (id, user_id, date, mood, fatigue, sleep_quality, symptoms, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            ON CONFLICT (user_id, date) DO UPDATE
            SET mood = EXCLUDED.mood,
                fatigue = EXCLUDED.fatigue,
                sleep_quality = EXCLUDED.sleep_quality,
                symptoms = EXCLUDED.symptoms,
                notes = EXCLUDED.notes,
                updated_at = EXCLUDED.updated_at
            RETURNING {JOURNAL_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&entry.user_id)
        .bind(entry.date)
        .bind(entry.mood)
        .bind(entry.fatigue)
        .bind(entry.sleep_quality)
        .bind(&entry.symptoms)
        .bind(&entry.notes)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(stored)
    }

    async fn list_journal_entries(&self, user_id: &str, since: NaiveDate) -> StoreResult<Vec<JournalEntry>> {
        let entries = sqlx::query_as::<_, JournalEntry>(&format!(
            "SELECT {JOURNAL_COLUMNS} FROM journal_entries WHERE user_id = $1 AND date >= $2 ORDER BY date ASC"
        ))
        .bind(user_id)
        .bind(since)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    async fn latest_journal_entry(&self, user_id: &str) -> StoreResult<Option<JournalEntry>> {
        let entry = sqlx::query_as::<_, JournalEntry>(&format!(
            "SELECT {JOURNAL_COLUMNS} FROM journal_entries WHERE user_id = $1 ORDER BY date DESC LIMIT 1"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(entry)
    }

    async fn create_vital(&self, vital: CreateVital) -> StoreResult<Vital> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO vitals (id, user_id, measured_at, systolic, diastolic, heart_rate, weight_kg, source)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {VITAL_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&vital.user_id)
        .bind(vital.measured_at)
        .bind(vital.systolic)
        .bind(vital.diastolic)
        .bind(vital.heart_rate)
        .bind(vital.weight_kg)
        .bind(vital.source.as_str())
        .fetch_one(&self.db)
        .await?;

        Self::row_to_vital(row)
    }

    async fn list_vitals(&self, user_id: &str, since: DateTime<Utc>) -> StoreResult<Vec<Vital>> {
        let rows = sqlx::query(&format!(
            "SELECT {VITAL_COLUMNS} FROM vitals WHERE user_id = $1 AND measured_at >= $2 ORDER BY measured_at ASC"
        ))
        .bind(user_id)
        .bind(since)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(Self::row_to_vital).collect()
    }

    async fn latest_vital(&self, user_id: &str) -> StoreResult<Option<Vital>> {
        let row = sqlx::query(&format!(
            "SELECT {VITAL_COLUMNS} FROM vitals WHERE user_id = $1 ORDER BY measured_at DESC LIMIT 1"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        row.map(Self::row_to_vital).transpose()
    }
}
