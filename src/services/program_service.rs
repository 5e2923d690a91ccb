use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::program_template::{
    phase_for_week, session_date, weekly_template, TemplateError, PHASE_BANDS, TOTAL_WEEKS,
};
use crate::models::{CreatePhase, CreateProgram, CreateSession, Phase, Program, Session};
use crate::store::{RecordStore, SessionSeed, StoreError};

pub const DEFAULT_PROGRAM_NAME: &str = "Post-transplant cardio - 12 weeks";
pub const DEFAULT_PROGRAM_DESCRIPTION: &str =
    "Progressive 12-week cardio program following a heart transplant.";

#[derive(Error, Debug)]
pub enum ProgramError {
    #[error("No default program found. Call /api/v1/program/init first.")]
    NotInitialized,
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of seeding the default program for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Created { program_id: Uuid, sessions_created: u64 },
    AlreadyInitialized { program_id: Uuid, existing_sessions: i64 },
}

impl InitOutcome {
    pub fn program_id(&self) -> Uuid {
        match self {
            InitOutcome::Created { program_id, .. } => *program_id,
            InitOutcome::AlreadyInitialized { program_id, .. } => *program_id,
        }
    }
}

#[derive(Clone)]
pub struct ProgramService {
    store: Arc<dyn RecordStore>,
}

impl ProgramService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Seed the default program, its phases and the user's dated sessions.
    ///
    /// Sessions are only written when the user has none for the program;
    /// a partial set is left as is.
    pub async fn initialize(&self, user_id: &str, start: NaiveDate) -> Result<InitOutcome, ProgramError> {
        let (program, created) = self
            .store
            .ensure_default_program(CreateProgram {
                name: DEFAULT_PROGRAM_NAME.to_string(),
                description: Some(DEFAULT_PROGRAM_DESCRIPTION.to_string()),
                total_weeks: TOTAL_WEEKS,
            })
            .await?;

        if created {
            tracing::info!(program_id = %program.id, "Created default program");
        }

        self.ensure_phases(&program).await?;

        let sessions = build_sessions(user_id, program.id, start)?;
        let seeded = self
            .store
            .create_sessions_if_none(user_id, program.id, sessions)
            .await?;

        match seeded {
            SessionSeed::Created(sessions_created) => {
                tracing::info!(
                    user_id,
                    program_id = %program.id,
                    sessions_created,
                    %start,
                    "Initialized program sessions"
                );
                Ok(InitOutcome::Created {
                    program_id: program.id,
                    sessions_created,
                })
            }
            SessionSeed::AlreadyPresent(existing_sessions) => {
                tracing::debug!(
                    user_id,
                    program_id = %program.id,
                    existing_sessions,
                    "Sessions already exist, skipping initialization"
                );
                Ok(InitOutcome::AlreadyInitialized {
                    program_id: program.id,
                    existing_sessions,
                })
            }
        }
    }

    /// The user's session planned on `date`, if any.
    pub async fn session_on(&self, user_id: &str, date: NaiveDate) -> Result<Option<Session>, ProgramError> {
        let program = self.default_program().await?;
        let session = self.store.find_session_on(user_id, program.id, date).await?;
        Ok(session)
    }

    /// The user's sessions ordered by date, optionally limited to one week.
    pub async fn sessions(&self, user_id: &str, week: Option<i32>) -> Result<Vec<Session>, ProgramError> {
        if let Some(week) = week {
            phase_for_week(week)?;
        }

        let program = self.default_program().await?;
        let sessions = self.store.list_sessions(user_id, program.id, week).await?;
        Ok(sessions)
    }

    pub async fn phases(&self) -> Result<Vec<Phase>, ProgramError> {
        let program = self.default_program().await?;
        let phases = self.store.list_phases(program.id).await?;
        Ok(phases)
    }

    async fn default_program(&self) -> Result<Program, ProgramError> {
        self.store
            .find_default_program()
            .await?
            .ok_or(ProgramError::NotInitialized)
    }

    async fn ensure_phases(&self, program: &Program) -> Result<(), ProgramError> {
        let existing = self.store.list_phases(program.id).await?;
        if !existing.is_empty() {
            return Ok(());
        }

        let phases = PHASE_BANDS
            .iter()
            .map(|band| CreatePhase {
                program_id: program.id,
                phase_number: band.phase_number,
                label: band.label.to_string(),
                start_week: band.start_week,
                end_week: band.end_week,
            })
            .collect();

        let written = self.store.create_phases(phases).await?;
        tracing::info!(program_id = %program.id, written, "Created program phases");
        Ok(())
    }
}

/// Expand the full program into dated sessions starting on `start`.
pub fn build_sessions(user_id: &str, program_id: Uuid, start: NaiveDate) -> Result<Vec<CreateSession>, TemplateError> {
    let mut sessions = Vec::new();

    for week in 1..=TOTAL_WEEKS {
        let phase = phase_for_week(week)?;
        for template in weekly_template(week)? {
            sessions.push(CreateSession {
                user_id: user_id.to_string(),
                program_id,
                phase_number: phase.phase_number,
                week_number: week,
                date: session_date(start, week, template.day_offset),
                activity_type: template.activity_type,
                modality: template.modality,
                planned_duration_min: template.duration_min,
                intensity_hint: Some(template.intensity_hint.to_string()),
            });
        }
    }

    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Modality;

    #[test]
    fn test_build_sessions_covers_every_week() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let sessions = build_sessions("demo", Uuid::new_v4(), start).unwrap();

        assert_eq!(sessions.len(), 45);
        for week in 1..=TOTAL_WEEKS {
            assert!(sessions.iter().any(|s| s.week_number == week));
        }

        let first = &sessions[0];
        assert_eq!(first.date, start);
        assert_eq!(first.week_number, 1);
        assert_eq!(first.phase_number, 1);
        assert_eq!(first.modality, Modality::Walk);
        assert_eq!(first.planned_duration_min, 15);

        let last = sessions.last().unwrap();
        assert_eq!(last.week_number, 12);
        assert_eq!(last.phase_number, 4);
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2024, 3, 24).unwrap());
    }

    #[test]
    fn test_build_sessions_dates_are_unique_and_sorted() {
        let start = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let sessions = build_sessions("demo", Uuid::new_v4(), start).unwrap();
        assert!(sessions.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn test_phase_numbers_follow_bands() {
        let sessions = build_sessions("demo", Uuid::new_v4(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap();
        for session in sessions {
            let expected = (session.week_number - 1) / 3 + 1;
            assert_eq!(session.phase_number, expected);
        }
    }
}
