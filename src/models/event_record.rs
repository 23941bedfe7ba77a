use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use std::fmt;

/// Canonical event kind of a stored record.
///
/// The normalizer only ever produces `Push`, `PullRequest` or `Merge`. The
/// column is plain text, so rows written by anything else come back as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventAction {
    Push,
    PullRequest,
    Merge,
    Other(String),
}

impl EventAction {
    pub fn as_str(&self) -> &str {
        match self {
            EventAction::Push => "PUSH",
            EventAction::PullRequest => "PULL_REQUEST",
            EventAction::Merge => "MERGE",
            EventAction::Other(raw) => raw,
        }
    }
}

impl From<String> for EventAction {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PUSH" => EventAction::Push,
            "PULL_REQUEST" => EventAction::PullRequest,
            "MERGE" => EventAction::Merge,
            _ => EventAction::Other(raw),
        }
    }
}

impl From<EventAction> for String {
    fn from(action: EventAction) -> Self {
        match action {
            EventAction::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized webhook delivery. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub request_id: String,
    pub author: String,
    pub action: EventAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_branch: Option<String>,
    pub to_branch: String,
    /// Receipt time, `YYYY-MM-DDTHH:MM:SSZ`.
    pub timestamp: String,
}

impl<'r> FromRow<'r, PgRow> for EventRecord {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            request_id: row.try_get("request_id")?,
            author: row.try_get("author")?,
            action: EventAction::from(row.try_get::<String, _>("action")?),
            from_branch: row.try_get("from_branch")?,
            to_branch: row.try_get("to_branch")?,
            timestamp: row.try_get("timestamp")?,
        })
    }
}
