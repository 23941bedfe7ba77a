pub mod events;
pub mod webhook;

pub use events::{display_message, get_events, EventResponse, RECENT_EVENTS_LIMIT};
pub use webhook::{dashboard, receiver};
