//! Current arrivals snapshot and the background poller that refreshes it.
//!
//! A snapshot and its availability index are built together and swapped in
//! as one `Arc`, so readers always see records and options from the same
//! fetch. A failed poll leaves the previous snapshot in place.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::domain::{ArrivalRecord, Dimension};
use crate::filters::AvailabilityIndex;
use crate::marta::{ArrivalSource, MartaError};

/// Arrivals from one fetch plus the index derived from them.
#[derive(Debug, Clone)]
pub struct Snapshot {
    arrivals: Vec<ArrivalRecord>,
    index: AvailabilityIndex,
    fetched_at: Option<DateTime<Local>>,
}

impl Snapshot {
    /// Build a snapshot, indexing the records.
    pub fn new(arrivals: Vec<ArrivalRecord>, fetched_at: DateTime<Local>) -> Self {
        let index = AvailabilityIndex::build(&arrivals);
        Self {
            arrivals,
            index,
            fetched_at: Some(fetched_at),
        }
    }

    /// The placeholder used before the first successful fetch.
    pub fn empty() -> Self {
        Self {
            arrivals: Vec::new(),
            index: AvailabilityIndex::default(),
            fetched_at: None,
        }
    }

    pub fn arrivals(&self) -> &[ArrivalRecord] {
        &self.arrivals
    }

    pub fn index(&self) -> &AvailabilityIndex {
        &self.index
    }

    /// When the records were fetched. `None` until the first fetch.
    pub fn fetched_at(&self) -> Option<DateTime<Local>> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }
}

/// Thread-safe holder of the latest snapshot.
#[derive(Clone)]
pub struct SnapshotStore {
    inner: Arc<RwLock<Arc<Snapshot>>>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    /// A store holding the empty placeholder snapshot.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(Snapshot::empty()))),
        }
    }

    /// The latest snapshot.
    pub async fn current(&self) -> Arc<Snapshot> {
        self.inner.read().await.clone()
    }

    /// Replace the snapshot wholesale.
    pub async fn replace(&self, arrivals: Vec<ArrivalRecord>) -> Arc<Snapshot> {
        let snapshot = Arc::new(Snapshot::new(arrivals, Local::now()));
        *self.inner.write().await = snapshot.clone();
        snapshot
    }

    /// Fetch from `source` and install the result.
    ///
    /// On failure the existing snapshot is kept and the error returned.
    pub async fn refresh_from<S: ArrivalSource>(&self, source: &S) -> Result<Arc<Snapshot>, MartaError> {
        let arrivals = source.fetch_arrivals().await?;
        let snapshot = self.replace(arrivals).await;
        info!(
            arrivals = snapshot.len(),
            destinations = snapshot.index().len(Dimension::Destination),
            lines = snapshot.index().len(Dimension::Line),
            stations = snapshot.index().len(Dimension::Station),
            "refreshed arrivals"
        );
        Ok(snapshot)
    }
}

/// Poll `source` every `interval`, starting immediately.
pub fn spawn_poller<S>(source: Arc<S>, store: SnapshotStore, interval: Duration) -> JoinHandle<()>
where
    S: ArrivalSource + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = store.refresh_from(source.as_ref()).await {
                warn!(error = %e, "failed to refresh arrivals, keeping previous snapshot");
            }
        }
    })
}
