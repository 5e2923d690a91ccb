use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use axum_extra::extract::WithRejection;
use serde_json::Value;

use super::common::{LookBackQuery, MaybeFound};
use super::error::ApiError;
use super::state::AppState;
use crate::auth::UserContext;
use crate::models::{JournalEntry, JournalSubmission};
use crate::services::calendar;

pub fn journal_routes() -> Router<AppState> {
    Router::new()
        .route("/journal", get(list_journal_entries).post(record_journal_entry))
        .route("/journal/latest", get(latest_journal_entry))
}

/// Journal entries from the look-back window, oldest first
pub async fn list_journal_entries(
    State(state): State<AppState>,
    user: UserContext,
    WithRejection(Query(query), _): WithRejection<Query<LookBackQuery>, ApiError>,
) -> Result<Json<Vec<JournalEntry>>, ApiError> {
    let days = query.get_days()?;
    let entries = state
        .journal_service
        .recent_entries(&user.user_id, calendar::today(), days)
        .await?;

    Ok(Json(entries))
}

/// Upsert today's entry
pub async fn record_journal_entry(
    State(state): State<AppState>,
    user: UserContext,
    WithRejection(Json(body), _): WithRejection<Json<Value>, ApiError>,
) -> Result<(StatusCode, Json<JournalEntry>), ApiError> {
    let body = body.as_object().ok_or(ApiError::InvalidBody)?;
    let submission = JournalSubmission::from_json(body)?;

    let entry = state
        .journal_service
        .record_day(&user.user_id, calendar::today(), submission)
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn latest_journal_entry(
    State(state): State<AppState>,
    user: UserContext,
) -> Result<Json<MaybeFound<JournalEntry>>, ApiError> {
    let entry = state.journal_service.latest_entry(&user.user_id).await?;
    Ok(Json(MaybeFound::from_option(entry, "No journal entry yet.")))
}
