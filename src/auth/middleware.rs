use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{HttpMakeClassifier, TraceLayer};

/// CORS configuration for the dashboard client
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Request tracing for every route
pub fn trace_layer() -> TraceLayer<HttpMakeClassifier> {
    TraceLayer::new_for_http()
}
