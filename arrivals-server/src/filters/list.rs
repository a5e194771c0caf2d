//! Filtered, sorted, paginated arrival list.

use crate::domain::ArrivalRecord;

use super::FilterSelection;

/// Arrivals shown per page.
pub const PAGE_SIZE: usize = 10;

/// Number of pages needed for `len` items. Never less than one, so an empty
/// list still has a (blank) first page.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page number into `1..=page_count`.
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

/// Keep the records matching `selection`, ordered by waiting time.
///
/// The sort is stable: arrivals with equal waits keep their feed order.
pub fn filter_and_sort(records: &[ArrivalRecord], selection: &FilterSelection) -> Vec<ArrivalRecord> {
    let mut filtered: Vec<ArrivalRecord> = records
        .iter()
        .filter(|r| selection.matches(r))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| a.waiting_seconds.cmp(&b.waiting_seconds));
    filtered
}

/// The arrival list for one selection, split into pages.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedView {
    arrivals: Vec<ArrivalRecord>,
    page_size: usize,
    page: usize,
}

impl PagedView {
    /// Derive the view with the standard page size.
    pub fn derive(records: &[ArrivalRecord], selection: &FilterSelection, page: usize) -> Self {
        Self::with_page_size(records, selection, page, PAGE_SIZE)
    }

    /// Derive the view with a custom page size (zero is treated as one).
    pub fn with_page_size(
        records: &[ArrivalRecord],
        selection: &FilterSelection,
        page: usize,
        page_size: usize,
    ) -> Self {
        let mut view = Self {
            arrivals: filter_and_sort(records, selection),
            page_size: page_size.max(1),
            page: 1,
        };
        view.set_page(page);
        view
    }

    /// All matching arrivals in display order.
    pub fn arrivals(&self) -> &[ArrivalRecord] {
        &self.arrivals
    }

    /// Number of matching arrivals across all pages.
    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total pages, at least one.
    pub fn page_count(&self) -> usize {
        page_count(self.arrivals.len(), self.page_size)
    }

    /// Current page number, always within `1..=page_count()`.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Move to another page, clamping out-of-range requests.
    pub fn set_page(&mut self, page: usize) {
        self.page = clamp_page(page, self.page_count());
    }

    /// Arrivals on page `page` (1-based). Out-of-range pages are empty.
    pub fn page_items(&self, page: usize) -> &[ArrivalRecord] {
        if page == 0 {
            return &[];
        }
        let start = (page - 1).saturating_mul(self.page_size);
        if start >= self.arrivals.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(self.arrivals.len());
        &self.arrivals[start..end]
    }

    /// Arrivals on the current page.
    pub fn current_items(&self) -> &[ArrivalRecord] {
        self.page_items(self.page)
    }
}
