pub mod event_store;
pub mod in_memory_store;
pub mod ingest;
pub mod normalizer;

pub use event_store::{EventStore, PgEventStore};
pub use in_memory_store::InMemoryEventStore;
pub use ingest::{ingest, IgnoreReason, IngestOutcome};
