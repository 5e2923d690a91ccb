use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::extract::WithRejection;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ApiError;
use super::state::AppState;
use crate::auth::UserContext;
use crate::models::{ActivityType, Modality, Phase, Session};
use crate::services::calendar;
use crate::services::program_template::{phase_for_week, weekly_template, PhaseBand, SessionTemplate};
use crate::services::InitOutcome;

pub const NO_SESSION_TODAY: &str = "No session planned for today.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySession {
    pub id: Uuid,
    pub phase_number: i32,
    pub week_number: i32,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub modality: Modality,
    pub planned_duration_min: i32,
    pub intensity_hint: Option<String>,
}

impl From<Session> for TodaySession {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            phase_number: session.phase_number,
            week_number: session.week_number,
            date: session.date,
            activity_type: session.activity_type,
            modality: session.modality,
            planned_duration_min: session.planned_duration_min,
            intensity_hint: session.intensity_hint,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TodaySessionResponse {
    Planned(TodaySession),
    Rest { message: String },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitProgramResponse {
    pub message: String,
    pub program_id: Uuid,
    pub sessions_created: u64,
}

#[derive(Debug, Deserialize)]
pub struct SessionsQuery {
    /// Restrict to one program week (1-12)
    pub week: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekTemplateResponse {
    pub week: i32,
    pub phase: PhaseBand,
    pub sessions: Vec<SessionTemplate>,
}

pub fn program_routes() -> Router<AppState> {
    Router::new()
        .route("/program", get(get_today_session))
        .route("/program/today", get(get_today_session))
        .route("/program/init", post(init_program))
        .route("/program/sessions", get(list_sessions))
        .route("/program/phases", get(list_phases))
        .route("/program/template/:week", get(get_week_template))
}

/// Today's planned session in the default program
pub async fn get_today_session(
    State(state): State<AppState>,
    user: UserContext,
) -> Result<Json<TodaySessionResponse>, ApiError> {
    let session = state
        .program_service
        .session_on(&user.user_id, calendar::today())
        .await?;

    let response = match session {
        Some(session) => TodaySessionResponse::Planned(session.into()),
        None => TodaySessionResponse::Rest {
            message: NO_SESSION_TODAY.to_string(),
        },
    };

    Ok(Json(response))
}

/// Seed the default program and the user's sessions starting today
pub async fn init_program(
    State(state): State<AppState>,
    user: UserContext,
) -> Result<(StatusCode, Json<InitProgramResponse>), ApiError> {
    let outcome = state
        .program_service
        .initialize(&user.user_id, calendar::today())
        .await?;

    let (status, response) = match outcome {
        InitOutcome::Created {
            program_id,
            sessions_created,
        } => (
            StatusCode::CREATED,
            InitProgramResponse {
                message: "12-week program initialized for the patient.".to_string(),
                program_id,
                sessions_created,
            },
        ),
        InitOutcome::AlreadyInitialized { program_id, .. } => (
            StatusCode::OK,
            InitProgramResponse {
                message: "Sessions already exist for this patient and program. Nothing to do.".to_string(),
                program_id,
                sessions_created: 0,
            },
        ),
    };

    Ok((status, Json(response)))
}

pub async fn list_sessions(
    State(state): State<AppState>,
    user: UserContext,
    WithRejection(Query(query), _): WithRejection<Query<SessionsQuery>, ApiError>,
) -> Result<Json<Vec<Session>>, ApiError> {
    let sessions = state
        .program_service
        .sessions(&user.user_id, query.week)
        .await?;

    Ok(Json(sessions))
}

pub async fn list_phases(
    State(state): State<AppState>,
    _user: UserContext,
) -> Result<Json<Vec<Phase>>, ApiError> {
    let phases = state.program_service.phases().await?;
    Ok(Json(phases))
}

/// The static weekly schedule for one program week
pub async fn get_week_template(
    WithRejection(Path(week), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<WeekTemplateResponse>, ApiError> {
    let phase = *phase_for_week(week)?;
    let sessions = weekly_template(week)?;

    Ok(Json(WeekTemplateResponse { week, phase, sessions }))
}
