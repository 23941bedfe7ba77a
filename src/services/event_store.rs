use axum::async_trait;

use crate::database::DatabasePool;
use crate::error::StoreError;
use crate::models::EventRecord;

/// Append-only persistence for normalized events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Persist one record.
    async fn append(&self, record: &EventRecord) -> Result<(), StoreError>;

    /// Up to `limit` records, newest `timestamp` first.
    async fn query_recent(&self, limit: usize) -> Result<Vec<EventRecord>, StoreError>;
}

/// Postgres-backed store over the `github_events` table.
#[derive(Clone)]
pub struct PgEventStore {
    pool: DatabasePool,
}

impl PgEventStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn append(&self, record: &EventRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO github_events (request_id, author, action, from_branch, to_branch, "timestamp")
            VALUES ($1, $2, $3, $4, $5, $6)
            "#
        )
        .bind(&record.request_id)
        .bind(&record.author)
        .bind(record.action.as_str())
        .bind(&record.from_branch)
        .bind(&record.to_branch)
        .bind(&record.timestamp)
        .execute(&*self.pool)
        .await?;

        Ok(())
    }

    async fn query_recent(&self, limit: usize) -> Result<Vec<EventRecord>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        // The surrogate id only breaks timestamp ties; it is never selected.
        let records = sqlx::query_as::<_, EventRecord>(
            r#"
            SELECT request_id, author, action, from_branch, to_branch, "timestamp"
            FROM github_events
            ORDER BY "timestamp" DESC, id DESC
            LIMIT $1
            "#
        )
        .bind(limit)
        .fetch_all(&*self.pool)
        .await?;

        Ok(records)
    }
}
