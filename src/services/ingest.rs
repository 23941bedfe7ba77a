//! Normalize-then-append pipeline shared by the webhook receiver and the CLI.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::IngestError;
use crate::models::EventRecord;
use crate::services::event_store::EventStore;
use crate::services::normalizer::{self, EventKind, Normalized};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Header missing or not one of the recognized event types.
    UnknownEventType(Option<String>),
    /// Recognized event type, but a sub-action that produces no record.
    UnhandledAction(String),
}

/// Result of handling one delivery.
#[derive(Debug)]
pub enum IngestOutcome {
    Stored(EventRecord),
    Ignored(IgnoreReason),
    Failed(IngestError),
}

impl IngestOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, IngestOutcome::Stored(_))
    }
}

/// Resolve the event type, normalize the payload and append at most one record.
///
/// Never returns an error: every fault ends up in [`IngestOutcome::Failed`].
pub async fn ingest(
    store: &dyn EventStore,
    event_type: Option<&str>,
    payload: &Value,
    received_at: DateTime<Utc>,
) -> IngestOutcome {
    let Some(kind) = event_type.and_then(EventKind::from_header) else {
        return IngestOutcome::Ignored(IgnoreReason::UnknownEventType(
            event_type.map(str::to_string),
        ));
    };

    let record = match normalizer::normalize(kind, payload, received_at) {
        Ok(Normalized::Record(record)) => record,
        Ok(Normalized::Skipped { action }) => {
            return IngestOutcome::Ignored(IgnoreReason::UnhandledAction(action));
        }
        Err(e) => return IngestOutcome::Failed(e.into()),
    };

    match store.append(&record).await {
        Ok(()) => IngestOutcome::Stored(record),
        Err(e) => IngestOutcome::Failed(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NormalizeError, StoreError};
    use crate::models::EventAction;
    use crate::services::event_store::MockEventStore;
    use chrono::TimeZone;
    use serde_json::json;

    fn received_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 5, 14, 7, 9).unwrap()
    }

    fn push_payload() -> Value {
        json!({
            "pusher": {"name": "alice"},
            "ref": "refs/heads/main",
            "commits": [{"id": "abc123def4567890"}]
        })
    }

    #[tokio::test]
    async fn stores_normalized_push() {
        let mut store = MockEventStore::new();
        store
            .expect_append()
            .withf(|record: &EventRecord| {
                record.request_id == "abc123def456" && record.action == EventAction::Push
            })
            .times(1)
            .returning(|_| Ok(()));

        let outcome = ingest(&store, Some("push"), &push_payload(), received_at()).await;

        match outcome {
            IngestOutcome::Stored(record) => {
                assert_eq!(record.author, "alice");
                assert_eq!(record.timestamp, "2026-03-05T14:07:09Z");
            }
            other => panic!("expected stored outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn store_fault_is_reported_as_failed() {
        let mut store = MockEventStore::new();
        store
            .expect_append()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("connection refused".into())));

        let outcome = ingest(&store, Some("push"), &push_payload(), received_at()).await;

        assert!(matches!(
            outcome,
            IngestOutcome::Failed(IngestError::Store(StoreError::Unavailable(_)))
        ));
    }

    #[tokio::test]
    async fn unknown_event_type_never_touches_store() {
        let mut store = MockEventStore::new();
        store.expect_append().times(0);

        let outcome = ingest(&store, Some("issues"), &push_payload(), received_at()).await;
        assert!(matches!(
            outcome,
            IngestOutcome::Ignored(IgnoreReason::UnknownEventType(Some(ref t))) if t == "issues"
        ));

        let outcome = ingest(&store, None, &push_payload(), received_at()).await;
        assert!(matches!(
            outcome,
            IngestOutcome::Ignored(IgnoreReason::UnknownEventType(None))
        ));
    }

    #[tokio::test]
    async fn closed_without_merge_is_ignored() {
        let mut store = MockEventStore::new();
        store.expect_append().times(0);

        let payload = json!({
            "action": "closed",
            "pull_request": {"number": 7, "merged": false}
        });
        let outcome = ingest(&store, Some("pull_request"), &payload, received_at()).await;

        assert!(matches!(
            outcome,
            IngestOutcome::Ignored(IgnoreReason::UnhandledAction(ref a)) if a == "closed"
        ));
    }

    #[tokio::test]
    async fn missing_field_fails_without_partial_write() {
        let mut store = MockEventStore::new();
        store.expect_append().times(0);

        let payload = json!({"ref": "refs/heads/main", "pusher": {}});
        let outcome = ingest(&store, Some("push"), &payload, received_at()).await;

        assert!(matches!(
            outcome,
            IngestOutcome::Failed(IngestError::Normalize(NormalizeError::Payload { .. }))
        ));
    }
}
