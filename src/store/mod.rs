//! Persistence for programs, sessions, journal entries and vitals.
//!
//! Services talk to a [`RecordStore`] rather than to a pool directly so the
//! same handlers run against PostgreSQL in production and against
//! [`InMemoryStore`] in tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    CreatePhase, CreateProgram, CreateSession, CreateVital, JournalEntry, Phase, Program, Session,
    UpsertJournalEntry, Vital,
};

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Corrupt {entity} row: {reason}")]
    CorruptRow { entity: &'static str, reason: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of seeding a user's sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSeed {
    Created(u64),
    AlreadyPresent(i64),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the default program, creating it from `program` when none
    /// exists. The flag is `true` when this call created it.
    async fn ensure_default_program(&self, program: CreateProgram) -> StoreResult<(Program, bool)>;

    async fn find_default_program(&self) -> StoreResult<Option<Program>>;

    /// Phases of a program ordered by phase number.
    async fn list_phases(&self, program_id: Uuid) -> StoreResult<Vec<Phase>>;

    /// Inserts phases, skipping any `(program_id, phase_number)` already
    /// present. Returns the number of rows written.
    async fn create_phases(&self, phases: Vec<CreatePhase>) -> StoreResult<u64>;

    /// Inserts `sessions` for the user unless they already have sessions in
    /// `program_id`. The check and the insert are atomic per user and program.
    async fn create_sessions_if_none(
        &self,
        user_id: &str,
        program_id: Uuid,
        sessions: Vec<CreateSession>,
    ) -> StoreResult<SessionSeed>;

    /// First session of the user in `program_id` dated on `date`.
    async fn find_session_on(
        &self,
        user_id: &str,
        program_id: Uuid,
        date: NaiveDate,
    ) -> StoreResult<Option<Session>>;

    /// Sessions ordered by date, optionally restricted to one program week.
    async fn list_sessions(
        &self,
        user_id: &str,
        program_id: Uuid,
        week: Option<i32>,
    ) -> StoreResult<Vec<Session>>;

    /// Inserts or overwrites the entry keyed by `(user_id, date)`.
    async fn upsert_journal_entry(&self, entry: UpsertJournalEntry) -> StoreResult<JournalEntry>;

    /// Entries dated on or after `since`, oldest first.
    async fn list_journal_entries(&self, user_id: &str, since: NaiveDate) -> StoreResult<Vec<JournalEntry>>;

    async fn latest_journal_entry(&self, user_id: &str) -> StoreResult<Option<JournalEntry>>;

    async fn create_vital(&self, vital: CreateVital) -> StoreResult<Vital>;

    /// Vitals measured at or after `since`, oldest first.
    async fn list_vitals(&self, user_id: &str, since: DateTime<Utc>) -> StoreResult<Vec<Vital>>;

    async fn latest_vital(&self, user_id: &str) -> StoreResult<Option<Vital>>;
}
