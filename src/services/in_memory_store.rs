//! In-memory event store for tests and database-less local runs.

use axum::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::EventRecord;
use crate::services::event_store::EventStore;

/// Keeps records in insertion order. Ordering on read matches
/// [`PgEventStore`](crate::services::event_store::PgEventStore): newest
/// timestamp first, later inserts first among equal timestamps.
#[derive(Default)]
pub struct InMemoryEventStore {
    records: RwLock<Vec<EventRecord>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, record: &EventRecord) -> Result<(), StoreError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn query_recent(&self, limit: usize) -> Result<Vec<EventRecord>, StoreError> {
        let records = self.records.read().await;
        let mut recent: Vec<EventRecord> = records.iter().rev().cloned().collect();
        // Stable sort keeps the reversed insertion order for ties.
        recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        recent.truncate(limit);
        Ok(recent)
    }
}
