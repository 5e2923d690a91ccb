use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use super::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    Ok(Json(json!({
        "status": "ok",
        "env": state.environment,
        "service": "rehab-tracker",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
