use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, Json},
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::services::ingest::{ingest, IgnoreReason, IngestOutcome};
use crate::services::normalizer::EVENT_TYPE_HEADER;
use crate::AppState;

pub async fn dashboard() -> Html<&'static str> {
    Html(include_str!("../../static/dashboard/index.html"))
}

/// Parse the delivery body. Empty, unparseable and empty-valued JSON
/// (`null`, `{}`, `[]`) all count as no payload.
pub fn parse_payload(body: &[u8]) -> Option<Value> {
    let payload: Value = serde_json::from_slice(body).ok()?;
    let empty = match &payload {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    };
    (!empty).then_some(payload)
}

// Acknowledges every parseable delivery with 200 so the sender never
// redelivers; the outcome is only visible in the logs.
pub async fn receiver(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let Some(payload) = parse_payload(&body) else {
        tracing::warn!("Webhook delivery rejected: no payload received");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "No payload received"})),
        );
    };

    let event_type = headers
        .get(EVENT_TYPE_HEADER)
        .and_then(|h| h.to_str().ok());

    match ingest(state.store.as_ref(), event_type, &payload, Utc::now()).await {
        IngestOutcome::Stored(record) => {
            tracing::info!(
                request_id = %record.request_id,
                action = %record.action,
                author = %record.author,
                "Event stored"
            );
        }
        IngestOutcome::Ignored(IgnoreReason::UnknownEventType(event_type)) => {
            tracing::debug!(?event_type, "Ignoring delivery with unrecognized event type");
        }
        IngestOutcome::Ignored(IgnoreReason::UnhandledAction(action)) => {
            tracing::debug!(%action, "Ignoring pull request action");
        }
        IngestOutcome::Failed(e) => {
            tracing::error!("Error processing webhook: {}", e);
        }
    }

    (StatusCode::OK, Json(json!({"status": "success"})))
}
