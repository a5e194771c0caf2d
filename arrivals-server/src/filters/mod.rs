//! Cross-filter availability engine.
//!
//! Given a flat snapshot of arrivals this module derives the three option
//! sets (destinations, lines, stations), decides which options stay
//! selectable under a partial selection, and turns the snapshot plus the
//! selection into a stable, paged arrival list.
//!
//! Everything here is pure and synchronous. [`Board`] ties the pieces
//! together in the order they must run.

mod board;
mod index;
mod list;
mod resolver;
mod selection;

#[cfg(test)]
mod proptests;

pub use board::Board;
pub use index::{AvailabilityIndex, OptionEntry};
pub use list::{PAGE_SIZE, PagedView, clamp_page, filter_and_sort, page_count};
pub use resolver::{OptionState, is_disabled, resolve_options};
pub use selection::{FilterSelection, Reconciliation};
