use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RecordStore, SessionSeed, StoreResult};
use crate::models::{
    CreatePhase, CreateProgram, CreateSession, CreateVital, JournalEntry, Phase, Program, Session,
    UpsertJournalEntry, Vital,
};

#[derive(Default)]
struct Tables {
    programs: Vec<Program>,
    phases: Vec<Phase>,
    sessions: Vec<Session>,
    journal_entries: Vec<JournalEntry>,
    vitals: Vec<Vital>,
}

/// In-memory record store.
///
/// Mirrors the uniqueness rules of the PostgreSQL schema so services behave
/// the same against either backend.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn session_count(&self) -> usize {
        self.tables.read().await.sessions.len()
    }

    pub async fn journal_entry_count(&self) -> usize {
        self.tables.read().await.journal_entries.len()
    }

    pub async fn vital_count(&self) -> usize {
        self.tables.read().await.vitals.len()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn ensure_default_program(&self, program: CreateProgram) -> StoreResult<(Program, bool)> {
        let mut tables = self.tables.write().await;

        if let Some(existing) = tables.programs.iter().find(|p| p.is_default) {
            return Ok((existing.clone(), false));
        }

        let created = Program {
            id: Uuid::new_v4(),
            name: program.name,
            description: program.description,
            total_weeks: program.total_weeks,
            is_default: true,
            created_at: Utc::now(),
        };
        tables.programs.push(created.clone());

        Ok((created, true))
    }

    async fn find_default_program(&self) -> StoreResult<Option<Program>> {
        let tables = self.tables.read().await;
        Ok(tables.programs.iter().find(|p| p.is_default).cloned())
    }

    async fn list_phases(&self, program_id: Uuid) -> StoreResult<Vec<Phase>> {
        let tables = self.tables.read().await;
        let mut phases: Vec<Phase> = tables
            .phases
            .iter()
            .filter(|p| p.program_id == program_id)
            .cloned()
            .collect();
        phases.sort_by_key(|p| p.phase_number);
        Ok(phases)
    }

    async fn create_phases(&self, phases: Vec<CreatePhase>) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let mut written = 0;

        for phase in phases {
            let duplicate = tables
                .phases
                .iter()
                .any(|p| p.program_id == phase.program_id && p.phase_number == phase.phase_number);
            if duplicate {
                continue;
            }

            tables.phases.push(Phase {
                id: Uuid::new_v4(),
                program_id: phase.program_id,
                phase_number: phase.phase_number,
                label: phase.label,
                start_week: phase.start_week,
                end_week: phase.end_week,
            });
            written += 1;
        }

        Ok(written)
    }

    async fn create_sessions_if_none(
        &self,
        user_id: &str,
        program_id: Uuid,
        sessions: Vec<CreateSession>,
    ) -> StoreResult<SessionSeed> {
        let mut tables = self.tables.write().await;

        let existing = tables
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id && s.program_id == program_id)
            .count();
        if existing > 0 {
            return Ok(SessionSeed::AlreadyPresent(existing as i64));
        }

        let now = Utc::now();
        let written = sessions.len() as u64;

        tables.sessions.extend(sessions.into_iter().map(|s| Session {
            id: Uuid::new_v4(),
            user_id: s.user_id,
            program_id: s.program_id,
            phase_number: s.phase_number,
            week_number: s.week_number,
            date: s.date,
            activity_type: s.activity_type,
            modality: s.modality,
            planned_duration_min: s.planned_duration_min,
            intensity_hint: s.intensity_hint,
            created_at: now,
        }));

        Ok(SessionSeed::Created(written))
    }

    async fn find_session_on(
        &self,
        user_id: &str,
        program_id: Uuid,
        date: NaiveDate,
    ) -> StoreResult<Option<Session>> {
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .iter()
            .find(|s| s.user_id == user_id && s.program_id == program_id && s.date == date)
            .cloned())
    }

    async fn list_sessions(
        &self,
        user_id: &str,
        program_id: Uuid,
        week: Option<i32>,
    ) -> StoreResult<Vec<Session>> {
        let tables = self.tables.read().await;
        let mut sessions: Vec<Session> = tables
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id && s.program_id == program_id)
            .filter(|s| week.map_or(true, |w| s.week_number == w))
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.date);
        Ok(sessions)
    }

    async fn upsert_journal_entry(&self, entry: UpsertJournalEntry) -> StoreResult<JournalEntry> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();

        if let Some(existing) = tables
            .journal_entries
            .iter_mut()
            .find(|e| e.user_id == entry.user_id && e.date == entry.date)
        {
            existing.mood = entry.mood;
            existing.fatigue = entry.fatigue;
            existing.sleep_quality = entry.sleep_quality;
            existing.symptoms = entry.symptoms;
            existing.notes = entry.notes;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let created = JournalEntry {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            date: entry.date,
            mood: entry.mood,
            fatigue: entry.fatigue,
            sleep_quality: entry.sleep_quality,
            symptoms: entry.symptoms,
            notes: entry.notes,
            created_at: now,
            updated_at: now,
        };
        tables.journal_entries.push(created.clone());

        Ok(created)
    }

    async fn list_journal_entries(&self, user_id: &str, since: NaiveDate) -> StoreResult<Vec<JournalEntry>> {
        let tables = self.tables.read().await;
        let mut entries: Vec<JournalEntry> = tables
            .journal_entries
            .iter()
            .filter(|e| e.user_id == user_id && e.date >= since)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }

    async fn latest_journal_entry(&self, user_id: &str) -> StoreResult<Option<JournalEntry>> {
        let tables = self.tables.read().await;
        Ok(tables
            .journal_entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .max_by_key(|e| e.date)
            .cloned())
    }

    async fn create_vital(&self, vital: CreateVital) -> StoreResult<Vital> {
        let mut tables = self.tables.write().await;

        let created = Vital {
            id: Uuid::new_v4(),
            user_id: vital.user_id,
            measured_at: vital.measured_at,
            systolic: vital.systolic,
            diastolic: vital.diastolic,
            heart_rate: vital.heart_rate,
            weight_kg: vital.weight_kg,
            source: vital.source,
        };
        tables.vitals.push(created.clone());

        Ok(created)
    }

    async fn list_vitals(&self, user_id: &str, since: DateTime<Utc>) -> StoreResult<Vec<Vital>> {
        let tables = self.tables.read().await;
        let mut vitals: Vec<Vital> = tables
            .vitals
            .iter()
            .filter(|v| v.user_id == user_id && v.measured_at >= since)
            .cloned()
            .collect();
        vitals.sort_by_key(|v| v.measured_at);
        Ok(vitals)
    }

    async fn latest_vital(&self, user_id: &str) -> StoreResult<Option<Vital>> {
        let tables = self.tables.read().await;
        Ok(tables
            .vitals
            .iter()
            .filter(|v| v.user_id == user_id)
            .max_by_key(|v| v.measured_at)
            .cloned())
    }
}
