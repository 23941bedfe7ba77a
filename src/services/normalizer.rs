//! Maps a webhook delivery onto the canonical [`EventRecord`] shape.
//!
//! Pure: no I/O, the receipt time is passed in by the caller.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::NormalizeError;
use crate::models::payloads::{Account, BranchRef};
use crate::models::{EventAction, EventRecord, PullRequestPayload, PushPayload};
use crate::utils::date::format_stored_timestamp;

/// Header carrying the event type on every delivery.
pub const EVENT_TYPE_HEADER: &str = "X-GitHub-Event";
pub const PUSH_EVENT: &str = "push";
pub const PULL_REQUEST_EVENT: &str = "pull_request";

const REQUEST_ID_LEN: usize = 12;
const BRANCH_REF_PREFIX: &str = "refs/heads/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Push,
    PullRequest,
}

impl EventKind {
    /// Recognize an event-type header value. Anything else is not ours to handle.
    pub fn from_header(value: &str) -> Option<Self> {
        match value {
            PUSH_EVENT => Some(EventKind::Push),
            PULL_REQUEST_EVENT => Some(EventKind::PullRequest),
            _ => None,
        }
    }
}

/// What the normalizer made of a delivery of a recognized kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Record(EventRecord),
    /// A pull-request sub-action that produces no record (e.g. `reopened`,
    /// or `closed` without a merge).
    Skipped { action: String },
}

pub fn normalize(
    kind: EventKind,
    payload: &Value,
    received_at: DateTime<Utc>,
) -> Result<Normalized, NormalizeError> {
    let timestamp = format_stored_timestamp(received_at);
    match kind {
        EventKind::Push => normalize_push(payload, timestamp).map(Normalized::Record),
        EventKind::PullRequest => normalize_pull_request(payload, timestamp),
    }
}

fn normalize_push(payload: &Value, timestamp: String) -> Result<EventRecord, NormalizeError> {
    let push = PushPayload::deserialize(payload).map_err(|source| NormalizeError::Payload {
        event: PUSH_EVENT,
        source,
    })?;

    let request_id = match push.commits.first() {
        Some(commit) if !commit.id.is_empty() => commit.id.chars().take(REQUEST_ID_LEN).collect(),
        _ => fallback_request_id(payload),
    };

    Ok(EventRecord {
        request_id,
        author: push.pusher.name,
        action: EventAction::Push,
        from_branch: None,
        to_branch: branch_from_ref(&push.git_ref),
        timestamp,
    })
}

fn normalize_pull_request(payload: &Value, timestamp: String) -> Result<Normalized, NormalizeError> {
    let event = PullRequestPayload::deserialize(payload).map_err(|source| NormalizeError::Payload {
        event: PULL_REQUEST_EVENT,
        source,
    })?;
    let pr = event.pull_request;

    let (action, author, suffix) = match event.action.as_str() {
        "opened" => (
            EventAction::PullRequest,
            login(pr.user, "pull_request.user.login")?,
            "opened",
        ),
        "closed" if pr.merged => (
            EventAction::Merge,
            login(pr.merged_by, "pull_request.merged_by.login")?,
            "merged",
        ),
        _ => return Ok(Normalized::Skipped { action: event.action.clone() }),
    };

    Ok(Normalized::Record(EventRecord {
        request_id: format!("pr-{}-{}", pr.number, suffix),
        author,
        action,
        from_branch: Some(branch(pr.head, "pull_request.head.ref")?),
        to_branch: branch(pr.base, "pull_request.base.ref")?,
        timestamp,
    }))
}

fn login(account: Option<Account>, field: &'static str) -> Result<String, NormalizeError> {
    account
        .map(|a| a.login)
        .ok_or(NormalizeError::MissingField(field))
}

fn branch(branch: Option<BranchRef>, field: &'static str) -> Result<String, NormalizeError> {
    branch
        .map(|b| b.name)
        .ok_or(NormalizeError::MissingField(field))
}

/// `refs/heads/feature/x` → `feature/x`. Refs outside `refs/heads/` (tags)
/// fall back to their last path segment.
pub fn branch_from_ref(git_ref: &str) -> String {
    match git_ref.strip_prefix(BRANCH_REF_PREFIX) {
        Some(branch) => branch.to_string(),
        None => git_ref.rsplit('/').next().unwrap_or(git_ref).to_string(),
    }
}

/// First 12 hex chars of the SHA-256 of the payload serialized with sorted keys.
///
/// serde_json's map is ordered by key, so `to_string` is already canonical.
pub fn fallback_request_id(payload: &Value) -> String {
    let canonical = payload.to_string();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    hash[..REQUEST_ID_LEN].to_string()
}
