use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;

use super::common::{LookBackQuery, MaybeFound};
use super::error::ApiError;
use super::state::AppState;
use crate::auth::UserContext;
use crate::models::{Vital, VitalSubmission};
use crate::services::calendar;

pub fn vitals_routes() -> Router<AppState> {
    Router::new()
        .route("/vitals", get(list_vitals).post(record_vitals))
        .route("/vitals/latest", get(latest_vitals))
}

/// Measurements from the look-back window, oldest first
pub async fn list_vitals(
    State(state): State<AppState>,
    user: UserContext,
    WithRejection(Query(query), _): WithRejection<Query<LookBackQuery>, ApiError>,
) -> Result<Json<Vec<Vital>>, ApiError> {
    let days = query.get_days()?;
    let vitals = state
        .vital_service
        .recent(&user.user_id, calendar::today(), days)
        .await?;

    Ok(Json(vitals))
}

/// Append a new measurement timestamped now
pub async fn record_vitals(
    State(state): State<AppState>,
    user: UserContext,
    WithRejection(Json(submission), _): WithRejection<Json<VitalSubmission>, ApiError>,
) -> Result<(StatusCode, Json<Vital>), ApiError> {
    submission.validate()?;

    let vital = state
        .vital_service
        .record(&user.user_id, Utc::now(), submission)
        .await?;

    Ok((StatusCode::CREATED, Json(vital)))
}

pub async fn latest_vitals(
    State(state): State<AppState>,
    user: UserContext,
) -> Result<Json<MaybeFound<Vital>>, ApiError> {
    let vital = state.vital_service.latest(&user.user_id).await?;
    Ok(Json(MaybeFound::from_option(vital, "No vitals recorded yet.")))
}
