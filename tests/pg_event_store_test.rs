// Postgres-backed store tests. Require TEST_DATABASE_URL; each test clears the table,
// so run with `cargo test -- --ignored --test-threads=1`.

use std::sync::Arc;

use repo_activity_feed::models::EventAction;
use repo_activity_feed::services::{EventStore, PgEventStore};

use test_helpers::*;

#[tokio::test]
#[ignore] // Ignore by default - requires test database
async fn test_append_then_query_round_trips() {
    let pool = setup_test_db().await;
    let store = PgEventStore::new(Arc::new(pool));

    let merged = record("pr-3-merged", EventAction::Merge, "2026-03-05T14:07:09Z");
    let pushed = record("abc123def456", EventAction::Push, "2026-03-05T14:08:00Z");
    store.append(&merged).await.unwrap();
    store.append(&pushed).await.unwrap();

    let records = store.query_recent(20).await.unwrap();
    assert_eq!(records, vec![pushed, merged]);
}

#[tokio::test]
#[ignore]
async fn test_query_recent_honours_limit_and_ties() {
    let pool = setup_test_db().await;
    let store = PgEventStore::new(Arc::new(pool));

    for i in 0..5 {
        let r = record(&format!("same-{}", i), EventAction::Push, "2026-03-05T10:00:00Z");
        store.append(&r).await.unwrap();
    }

    let records = store.query_recent(3).await.unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.request_id.as_str()).collect();
    assert_eq!(ids, vec!["same-4", "same-3", "same-2"]);
}

#[tokio::test]
#[ignore]
async fn test_unknown_action_rows_are_read_back() {
    let pool = setup_test_db().await;

    sqlx::query(
        r#"INSERT INTO github_events (request_id, author, action, to_branch, "timestamp")
           VALUES ('manual-1', 'ops', 'RELEASE', 'main', '2026-03-05T12:00:00Z')"#
    )
    .execute(&pool)
    .await
    .unwrap();

    let store = PgEventStore::new(Arc::new(pool));
    let records = store.query_recent(20).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].action, EventAction::Other("RELEASE".to_string()));
    assert_eq!(records[0].from_branch, None);
}

#[tokio::test]
#[ignore]
async fn test_query_recent_sorts_by_timestamp_not_insertion_order() {
    let pool = setup_test_db().await;
    let store = PgEventStore::new(Arc::new(pool));

    for (id, ts) in [
        ("ten", "2026-03-05T10:00:00Z"),
        ("noon", "2026-03-05T12:00:00Z"),
        ("eleven", "2026-03-05T11:00:00Z"),
    ] {
        store.append(&record(id, EventAction::Push, ts)).await.unwrap();
    }

    let records = store.query_recent(20).await.unwrap();
    let timestamps: Vec<&str> = records.iter().map(|r| r.timestamp.as_str()).collect();
    assert_eq!(
        timestamps,
        vec!["2026-03-05T12:00:00Z", "2026-03-05T11:00:00Z", "2026-03-05T10:00:00Z"]
    );
}
