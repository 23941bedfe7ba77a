use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use crate::models::{EventAction, EventRecord};
use crate::utils::date::format_display_time;
use crate::AppState;

/// Number of records the dashboard feed returns.
pub const RECENT_EVENTS_LIMIT: usize = 20;

#[derive(Debug, Serialize)]
pub struct EventResponse {
    #[serde(flatten)]
    pub record: EventRecord,
    pub display_message: String,
}

impl From<EventRecord> for EventResponse {
    fn from(record: EventRecord) -> Self {
        let display_message = display_message(&record);
        Self { record, display_message }
    }
}

pub fn display_message(record: &EventRecord) -> String {
    let when = format_display_time(&record.timestamp);
    let from = record.from_branch.as_deref().unwrap_or_default();

    match &record.action {
        EventAction::Push => {
            format!("{} pushed to {} on {}", record.author, record.to_branch, when)
        }
        EventAction::PullRequest => format!(
            "{} submitted a pull request from {} to {} on {}",
            record.author, from, record.to_branch, when
        ),
        EventAction::Merge => format!(
            "{} merged branch {} to {} on {}",
            record.author, from, record.to_branch, when
        ),
        EventAction::Other(action) => {
            format!("{} performed {} on {}", record.author, action, when)
        }
    }
}

// An empty array with 500 on failure; callers cannot tell that apart from
// "no events yet" without the status code.
pub async fn get_events(
    State(state): State<AppState>,
) -> (StatusCode, Json<Vec<EventResponse>>) {
    match state.store.query_recent(RECENT_EVENTS_LIMIT).await {
        Ok(records) => (
            StatusCode::OK,
            Json(records.into_iter().map(EventResponse::from).collect()),
        ),
        Err(e) => {
            tracing::error!("Error fetching events: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Vec::new()))
        }
    }
}
