//! Application state for the HTTP server.

use std::sync::Arc;
use std::time::Instant;

use crate::services::RecordStore;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    pub store: RecordStore,
}

impl AppState {
    pub fn new(store: RecordStore) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            store,
        })
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
