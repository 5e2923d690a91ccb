use axum::{routing::get, Router};

use super::health::health_check;
use super::journal::journal_routes;
use super::program::program_routes;
use super::state::AppState;
use super::vitals::vitals_routes;
use crate::auth::{cors_layer, trace_layer};

pub fn create_routes(state: AppState) -> Router {
    let api_v1 = Router::new()
        .route("/health", get(health_check))
        .merge(journal_routes())
        .merge(vitals_routes())
        .merge(program_routes());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_v1)
        .layer(trace_layer())
        .layer(cors_layer())
        .with_state(state)
}
