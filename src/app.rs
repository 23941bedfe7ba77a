use std::any::Any;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::security_headers_middleware;
use crate::AppState;

/// Build the full HTTP surface around an injected state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::permanent("/webhook/") }))
        .route("/health", get(health_check))
        .route("/webhook", get(handlers::dashboard))
        .route("/webhook/", get(handlers::dashboard))
        .route("/webhook/receiver", post(handlers::receiver))
        .route("/webhook/api/events", get(handlers::get_events))
        .layer(CatchPanicLayer::custom(internal_error))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

fn internal_error(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Internal server error"})),
    )
        .into_response()
}
