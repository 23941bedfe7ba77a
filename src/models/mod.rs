//! Shared types: the stored event record and the inbound webhook payload shapes.

pub mod event_record;
pub mod payloads;

pub use event_record::{EventAction, EventRecord};
pub use payloads::{PullRequestPayload, PushPayload};
