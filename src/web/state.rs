use std::sync::Arc;

use crate::telemetry::SeriesStore;

/// Shared by every request handler.
///
/// The store is read-only after start-up, so it sits behind a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SeriesStore>,
}

impl AppState {
    pub fn new(store: SeriesStore) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}
