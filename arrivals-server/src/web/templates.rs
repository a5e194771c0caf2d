//! Askama templates for the web frontend.

use std::time::Duration;

use askama::Template;

use crate::domain::{ArrivalRecord, Dimension};
use crate::filters::{AvailabilityIndex, Board, OptionState, Reconciliation};

use super::dto::BoardQuery;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// The arrivals board: filters, list and pagination.
#[derive(Template)]
#[template(path = "index.html")]
pub struct BoardTemplate {
    pub filters: Vec<FilterView>,
    pub list: ArrivalListView,
    /// Shown when a selection was reset by the latest snapshot
    pub notice: Option<String>,
    pub updated_at: Option<String>,
    pub refresh_secs: u64,
    /// Auto-refresh target, carrying the reconciled selection
    pub refresh_href: String,
}

impl BoardTemplate {
    pub fn new(board: &Board, reconciliation: &Reconciliation, refresh_interval: Duration) -> Self {
        Self {
            filters: Dimension::ALL
                .into_iter()
                .map(|dimension| FilterView::from_board(board, dimension))
                .collect(),
            list: ArrivalListView::from_board(board),
            notice: cleared_notice(board.index(), reconciliation),
            updated_at: board
                .snapshot()
                .fetched_at()
                .map(|t| t.format("%H:%M:%S").to_string()),
            refresh_secs: refresh_interval.as_secs().max(1),
            refresh_href: board_href(board, board.view().page()),
        }
    }
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Arrival list fragment.
#[derive(Template)]
#[template(path = "arrival_list.html")]
pub struct ArrivalListTemplate {
    pub list: ArrivalListView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One filter control.
#[derive(Debug, Clone)]
pub struct FilterView {
    /// Query parameter name
    pub name: &'static str,
    pub label: &'static str,
    pub options: Vec<OptionState>,
}

impl FilterView {
    pub fn from_board(board: &Board, dimension: Dimension) -> Self {
        Self {
            name: dimension.param_name(),
            label: dimension.label(),
            options: board.options(dimension),
        }
    }

    /// Whether "Any" is the current choice.
    pub fn is_unset(&self) -> bool {
        !self.options.iter().any(|o| o.selected)
    }
}

/// An arrival row.
#[derive(Debug, Clone)]
pub struct ArrivalRow {
    pub station: String,
    pub destination: String,
    pub line: String,
    /// Lowercased line id, for the badge colour
    pub line_class: String,
    pub direction_code: &'static str,
    pub direction_label: &'static str,
    pub direction_arrow: &'static str,
    pub waiting_time: String,
    pub train_id: Option<String>,
    pub next_arrival: Option<String>,
}

impl ArrivalRow {
    pub fn from_record(record: &ArrivalRecord, index: &AvailabilityIndex) -> Self {
        Self {
            station: index.name_or_id(Dimension::Station, &record.station).to_string(),
            destination: index
                .name_or_id(Dimension::Destination, &record.destination)
                .to_string(),
            line: index.name_or_id(Dimension::Line, &record.line).to_string(),
            line_class: line_class(&record.line),
            direction_code: record.direction.code(),
            direction_label: record.direction.label(),
            direction_arrow: record.direction.arrow(),
            waiting_time: record.waiting_time.clone(),
            train_id: record.train_id.clone(),
            next_arrival: record.next_arrival.clone(),
        }
    }
}

/// A pagination link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub number: usize,
    pub href: String,
    pub current: bool,
}

/// The arrival list for one page.
#[derive(Debug, Clone)]
pub struct ArrivalListView {
    pub rows: Vec<ArrivalRow>,
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
    pub pages: Vec<PageLink>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

impl ArrivalListView {
    pub fn from_board(board: &Board) -> Self {
        let view = board.view();
        let index = board.index();
        let page = view.page();
        let page_count = view.page_count();
        let href = |n: usize| board_href(board, n);

        Self {
            rows: view
                .current_items()
                .iter()
                .map(|r| ArrivalRow::from_record(r, index))
                .collect(),
            page,
            page_count,
            total: view.len(),
            pages: (1..=page_count)
                .map(|n| PageLink {
                    number: n,
                    href: href(n),
                    current: n == page,
                })
                .collect(),
            prev_href: (page > 1).then(|| href(page - 1)),
            next_href: (page < page_count).then(|| href(page + 1)),
        }
    }

    /// Pagination is hidden for a single page.
    pub fn show_pagination(&self) -> bool {
        self.page_count > 1
    }
}

/// Board URL for the board's own selection at `page`.
fn board_href(board: &Board, page: usize) -> String {
    format!(
        "/?{}",
        BoardQuery::from_parts(board.selection(), page).to_query_string()
    )
}

/// CSS class for a line badge, e.g. "line-gold".
fn line_class(line: &str) -> String {
    let slug: String = line
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!("line-{slug}")
}

fn cleared_notice(index: &AvailabilityIndex, reconciliation: &Reconciliation) -> Option<String> {
    if !reconciliation.changed() {
        return None;
    }
    let parts: Vec<String> = reconciliation
        .cleared()
        .iter()
        .map(|(dimension, id)| {
            format!(
                "{} {}",
                dimension.label(),
                index.name_or_id(*dimension, id)
            )
        })
        .collect();
    Some(format!(
        "No longer in the arrivals feed, filter reset: {}",
        parts.join(", ")
    ))
}
