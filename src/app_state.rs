use std::sync::Arc;
use crate::config::Config;
use crate::services::event_store::EventStore;

/// Injected into every handler. The store is the only shared resource.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EventStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>, config: Arc<Config>) -> Self {
        Self { store, config }
    }
}
