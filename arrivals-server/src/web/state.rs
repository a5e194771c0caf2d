//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::marta::ArrivalProvider;
use crate::snapshot::SnapshotStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Latest arrivals snapshot
    pub store: SnapshotStore,

    /// Where snapshots come from, for on-demand refresh
    pub provider: Arc<ArrivalProvider>,

    /// Poll interval, also used as the page's auto-refresh period
    pub refresh_interval: Duration,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: SnapshotStore, provider: Arc<ArrivalProvider>, refresh_interval: Duration) -> Self {
        Self {
            store,
            provider,
            refresh_interval,
        }
    }
}
