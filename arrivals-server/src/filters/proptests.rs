//! Property tests for the availability engine.

use proptest::prelude::*;

use super::*;
use crate::domain::{ArrivalRecord, Dimension, Direction, WaitingSeconds};

/// Small id alphabets per dimension so that values repeat often and the
/// co-occurrence graph is dense. Prefixes keep dimensions disjoint.
fn arb_arrival() -> impl Strategy<Value = ArrivalRecord> {
    (
        "D[0-3]",
        "L[0-2]",
        "S[0-4]",
        prop_oneof![
            4 => (-60i32..900).prop_map(|s| s.to_string()),
            1 => Just("Arriving".to_string()),
        ],
    )
        .prop_map(|(dest, line, station, wait)| {
            ArrivalRecord::new(
                dest,
                line,
                station,
                WaitingSeconds::parse(&wait),
                wait,
                Direction::North,
            )
        })
}

fn arb_snapshot() -> impl Strategy<Value = Vec<ArrivalRecord>> {
    prop::collection::vec(arb_arrival(), 0..40)
}

/// Selection drawn from a slightly wider alphabet, so it sometimes names
/// values the snapshot doesn't contain.
fn arb_selection() -> impl Strategy<Value = FilterSelection> {
    (
        prop::option::of("D[0-5]"),
        prop::option::of("L[0-3]"),
        prop::option::of("S[0-6]"),
    )
        .prop_map(|(destination, line, station)| FilterSelection {
            destination,
            line,
            station,
        })
}

fn arb_dimension() -> impl Strategy<Value = Dimension> {
    prop_oneof![
        Just(Dimension::Destination),
        Just(Dimension::Line),
        Just(Dimension::Station),
    ]
}

/// Which dimension an id generated above belongs to.
fn dimension_of(id: &str) -> Dimension {
    match id.as_bytes().first() {
        Some(b'D') => Dimension::Destination,
        Some(b'L') => Dimension::Line,
        _ => Dimension::Station,
    }
}

proptest! {
    /// If B is available for A, A is available for B.
    #[test]
    fn co_occurrence_is_symmetric(records in arb_snapshot()) {
        let index = AvailabilityIndex::build(&records);

        for dim in Dimension::ALL {
            for (a, entry) in index.options(dim) {
                for b in entry.available() {
                    let other = index.entry(dimension_of(b), b);
                    prop_assert!(other.is_some(), "{} lists unknown id {}", a, b);
                    prop_assert!(other.unwrap().is_available(a), "{} -> {} not symmetric", a, b);
                }
            }
        }
    }

    /// An id is available for an entry iff some record carries both.
    #[test]
    fn available_iff_some_record_has_both(records in arb_snapshot()) {
        let index = AvailabilityIndex::build(&records);

        for dim in Dimension::ALL {
            for (a, entry) in index.options(dim) {
                for other in dim.others() {
                    for b in index.options(other).keys() {
                        let witnessed = records
                            .iter()
                            .any(|r| r.value(dim) == a && r.value(other) == b);
                        prop_assert_eq!(entry.is_available(b), witnessed);
                    }
                }
            }
        }
    }

    /// Building twice gives the same index.
    #[test]
    fn build_is_deterministic(records in arb_snapshot()) {
        prop_assert_eq!(AvailabilityIndex::build(&records), AvailabilityIndex::build(&records));
    }

    /// After reconciliation every selected id exists in the index.
    #[test]
    fn reconciliation_is_safe(records in arb_snapshot(), mut selection in arb_selection()) {
        let index = AvailabilityIndex::build(&records);
        let before = selection.clone();

        let result = selection.reconcile(&index);

        for dim in Dimension::ALL {
            if let Some(id) = selection.get(dim) {
                prop_assert!(index.contains(dim, id));
                prop_assert_eq!(before.get(dim), Some(id));
            }
            prop_assert_eq!(
                result.was_cleared(dim),
                before.get(dim).is_some() && selection.get(dim).is_none()
            );
        }
    }

    /// With only a destination selected, a line is enabled iff it co-occurs
    /// with that destination.
    #[test]
    fn destination_only_enables_reachable_lines(
        records in arb_snapshot().prop_filter("non-empty", |r| !r.is_empty()),
        pick in any::<prop::sample::Index>(),
    ) {
        let index = AvailabilityIndex::build(&records);
        let dest = pick.get(&records).destination.clone();
        let selection = FilterSelection::new().with(Dimension::Destination, dest.clone());
        let dest_entry = index.entry(Dimension::Destination, &dest).unwrap();

        for line in index.options(Dimension::Line).keys() {
            prop_assert_eq!(
                !is_disabled(&index, &selection, Dimension::Line, line),
                dest_entry.is_available(line)
            );
        }
    }

    /// An enabled option always leads to at least one arrival when added to
    /// a reconciled single-constraint selection.
    #[test]
    fn enabled_option_has_arrivals(
        records in arb_snapshot(),
        mut selection in arb_selection(),
        target in arb_dimension(),
    ) {
        let index = AvailabilityIndex::build(&records);
        selection.reconcile(&index);
        let active: Vec<Dimension> = target
            .others()
            .into_iter()
            .filter(|&d| selection.get(d).is_some())
            .collect();
        prop_assume!(active.len() == 1);

        for option in resolve_options(&index, &selection, target) {
            if option.disabled {
                continue;
            }
            let narrowed = selection.clone().with(target, option.id.clone());
            let view = PagedView::derive(&records, &narrowed, 1);
            prop_assert!(!view.is_empty(), "{:?} enabled but empty", option);
        }
    }

    /// Concatenating every page reproduces the filtered, sorted list.
    #[test]
    fn pages_cover_list_exactly(
        records in arb_snapshot(),
        selection in arb_selection(),
        page_size in 1usize..12,
    ) {
        let view = PagedView::with_page_size(&records, &selection, 1, page_size);

        let mut joined = Vec::new();
        for page in 1..=view.page_count() {
            let items = view.page_items(page);
            prop_assert!(items.len() <= page_size);
            joined.extend_from_slice(items);
        }
        prop_assert!(view.page_items(view.page_count() + 1).is_empty());
        prop_assert_eq!(joined, filter_and_sort(&records, &selection));
    }

    /// Filtered list only contains matches, in non-decreasing wait order.
    #[test]
    fn list_is_filtered_and_sorted(records in arb_snapshot(), selection in arb_selection()) {
        let list = filter_and_sort(&records, &selection);

        prop_assert!(list.iter().all(|r| selection.matches(r)));
        prop_assert_eq!(list.len(), records.iter().filter(|r| selection.matches(r)).count());
        for pair in list.windows(2) {
            prop_assert!(pair[0].waiting_seconds <= pair[1].waiting_seconds);
        }
    }

    /// Page count never drops below one and the page is always in range.
    #[test]
    fn page_always_in_range(
        records in arb_snapshot(),
        selection in arb_selection(),
        requested in 0usize..10,
    ) {
        let view = PagedView::derive(&records, &selection, requested);

        prop_assert!(view.page_count() >= 1);
        prop_assert!(view.page() >= 1 && view.page() <= view.page_count());
        if view.is_empty() {
            prop_assert_eq!(view.page_count(), 1);
        }
    }
}
