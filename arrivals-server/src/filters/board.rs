//! Event-driven board state.
//!
//! A [`Board`] owns the latest snapshot, the user's selection and the current
//! page. Each event (new snapshot, selection change, page change) re-runs the
//! pure pipeline end to end: reconcile, then derive the paged view. Because
//! reconciliation happens inside the same call that installs a snapshot,
//! nothing can observe the new snapshot with a stale selection.

use std::sync::Arc;

use tracing::debug;

use crate::domain::Dimension;
use crate::snapshot::Snapshot;

use super::{
    AvailabilityIndex, FilterSelection, OptionState, PagedView, Reconciliation, is_disabled,
    resolve_options,
};

/// Derived board state for one viewer.
#[derive(Debug, Clone)]
pub struct Board {
    snapshot: Arc<Snapshot>,
    selection: FilterSelection,
    view: PagedView,
}

impl Board {
    /// A board with nothing selected, on page one.
    pub fn new(snapshot: Arc<Snapshot>) -> Self {
        let view = PagedView::derive(snapshot.arrivals(), &FilterSelection::new(), 1);
        Self {
            snapshot,
            selection: FilterSelection::new(),
            view,
        }
    }

    /// Open a board with a previously held selection and page.
    ///
    /// The selection is reconciled against `snapshot` before anything is
    /// derived from it.
    pub fn open(
        snapshot: Arc<Snapshot>,
        selection: FilterSelection,
        page: usize,
    ) -> (Self, Reconciliation) {
        let mut board = Self {
            view: PagedView::derive(&[], &FilterSelection::new(), 1),
            snapshot,
            selection,
        };
        let reconciliation = board.reconcile();
        board.recompute(page);
        (board, reconciliation)
    }

    /// Install a new snapshot, resetting selections it no longer supports.
    pub fn apply_snapshot(&mut self, snapshot: Arc<Snapshot>) -> Reconciliation {
        self.snapshot = snapshot;
        let reconciliation = self.reconcile();
        self.recompute(self.view.page());
        reconciliation
    }

    /// Change one dimension's selection. `None` or an empty id clears it.
    ///
    /// Ids that aren't in the current snapshot are rejected the same way a
    /// stale selection is, and reported in the returned reconciliation.
    pub fn select(&mut self, dimension: Dimension, id: Option<String>) -> Reconciliation {
        self.selection.set(dimension, id);
        let reconciliation = self.reconcile();
        self.recompute(self.view.page());
        reconciliation
    }

    /// Move to another page. Out-of-range pages are clamped.
    pub fn set_page(&mut self, page: usize) {
        self.view.set_page(page);
    }

    fn reconcile(&mut self) -> Reconciliation {
        let reconciliation = self.selection.reconcile(self.snapshot.index());
        for (dimension, id) in reconciliation.cleared() {
            debug!(%dimension, id = %id, "selection no longer available, cleared");
        }
        reconciliation
    }

    fn recompute(&mut self, page: usize) {
        self.view = PagedView::derive(self.snapshot.arrivals(), &self.selection, page);
    }

    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.snapshot
    }

    pub fn index(&self) -> &AvailabilityIndex {
        self.snapshot.index()
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn view(&self) -> &PagedView {
        &self.view
    }

    /// Option list for one dimension under the current selection.
    pub fn options(&self, dimension: Dimension) -> Vec<OptionState> {
        resolve_options(self.index(), &self.selection, dimension)
    }

    /// Whether one option is currently disabled.
    pub fn is_disabled(&self, dimension: Dimension, id: &str) -> bool {
        is_disabled(self.index(), &self.selection, dimension, id)
    }
}
