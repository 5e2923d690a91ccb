// Shared helpers for the integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Once};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use rehab_tracker::api::routes::create_routes;
use rehab_tracker::api::state::AppState;
use rehab_tracker::config::AppConfig;
use rehab_tracker::store::{InMemoryStore, RecordStore};

pub const TEST_USER: &str = "patient-test";

static LOGGING: Once = Once::new();

pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("rehab_tracker=debug")
            .with_test_writer()
            .try_init();
    });
}

pub fn test_config(user_id: Option<&str>) -> AppConfig {
    let user_id = user_id.map(str::to_string);
    AppConfig::from_vars(|key| match key {
        "ENVIRONMENT" => Some("test".to_string()),
        "STORAGE_BACKEND" => Some("memory".to_string()),
        "DEMO_USER_ID" => user_id.clone(),
        _ => None,
    })
    .expect("test config")
}

/// Router over a fresh in-memory store. The store handle is returned so
/// tests can seed or inspect records directly.
pub fn test_app(user_id: Option<&str>) -> (Router, InMemoryStore) {
    init_test_logging();

    let store = InMemoryStore::new();
    let shared: Arc<dyn RecordStore> = Arc::new(store.clone());
    let state = AppState::new(shared, &test_config(user_id));

    (create_routes(state), store)
}

/// Send one request and decode the JSON response body.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }

    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}
