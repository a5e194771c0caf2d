//! The user's current filter selection and its reconciliation against a
//! fresh snapshot.

use serde::{Deserialize, Serialize};

use crate::domain::{ArrivalRecord, Dimension};

use super::AvailabilityIndex;

/// Optional destination / line / station selection.
///
/// After [`FilterSelection::reconcile`] every set field is a key in its
/// dimension's option map for the snapshot it was reconciled against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub destination: Option<String>,
    pub line: Option<String>,
    pub station: Option<String>,
}

impl FilterSelection {
    /// A selection with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter. Empty strings mean "unset".
    pub fn with(mut self, dimension: Dimension, id: impl Into<String>) -> Self {
        self.set(dimension, Some(id.into()));
        self
    }

    /// The selected id for a dimension, if any.
    pub fn get(&self, dimension: Dimension) -> Option<&str> {
        self.slot(dimension).as_deref()
    }

    /// Set or clear one dimension. `Some("")` clears, matching the "Any"
    /// choice of a form select.
    pub fn set(&mut self, dimension: Dimension, id: Option<String>) {
        *self.slot_mut(dimension) = id.filter(|s| !s.is_empty());
    }

    /// Whether no dimension is selected.
    pub fn is_empty(&self) -> bool {
        Dimension::ALL.iter().all(|&d| self.get(d).is_none())
    }

    fn slot(&self, dimension: Dimension) -> &Option<String> {
        match dimension {
            Dimension::Destination => &self.destination,
            Dimension::Line => &self.line,
            Dimension::Station => &self.station,
        }
    }

    fn slot_mut(&mut self, dimension: Dimension) -> &mut Option<String> {
        match dimension {
            Dimension::Destination => &mut self.destination,
            Dimension::Line => &mut self.line,
            Dimension::Station => &mut self.station,
        }
    }

    /// Clear every selection that no longer exists in `index`.
    ///
    /// Must run whenever the snapshot changes, before options or the arrival
    /// list are derived from it. The returned [`Reconciliation`] tells the
    /// caller which selections were reset.
    pub fn reconcile(&mut self, index: &AvailabilityIndex) -> Reconciliation {
        let mut cleared = Vec::new();

        for dimension in Dimension::ALL {
            let slot = self.slot_mut(dimension);
            let stale = slot.as_deref().is_some_and(|id| !index.contains(dimension, id));
            if stale && let Some(id) = slot.take() {
                cleared.push((dimension, id));
            }
        }

        Reconciliation { cleared }
    }

    /// Whether a record passes every active selection.
    ///
    /// Unset dimensions impose no constraint.
    pub fn matches(&self, record: &ArrivalRecord) -> bool {
        Dimension::ALL
            .iter()
            .all(|&d| self.get(d).is_none_or(|id| record.value(d) == id))
    }
}

/// Outcome of reconciling a selection with a new snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    cleared: Vec<(Dimension, String)>,
}

impl Reconciliation {
    /// Selections that were reset, with the id each one held.
    pub fn cleared(&self) -> &[(Dimension, String)] {
        &self.cleared
    }

    /// Whether reconciliation changed the selection.
    pub fn changed(&self) -> bool {
        !self.cleared.is_empty()
    }

    /// Whether a particular dimension was reset.
    pub fn was_cleared(&self, dimension: Dimension) -> bool {
        self.cleared.iter().any(|(d, _)| *d == dimension)
    }

    /// Fold another reconciliation into this one.
    pub fn merge(&mut self, other: Reconciliation) {
        self.cleared.extend(other.cleared);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, WaitingSeconds};

    fn arrival(dest: &str, line: &str, station: &str) -> ArrivalRecord {
        ArrivalRecord::new(
            dest,
            line,
            station,
            WaitingSeconds::from_secs(60.0),
            "1 min",
            Direction::South,
        )
    }

    #[test]
    fn empty_string_clears() {
        let mut selection = FilterSelection::new().with(Dimension::Line, "GOLD");
        assert_eq!(selection.get(Dimension::Line), Some("GOLD"));

        selection.set(Dimension::Line, Some(String::new()));
        assert_eq!(selection.get(Dimension::Line), None);
        assert!(selection.is_empty());
    }

    #[test]
    fn reconcile_keeps_present_ids() {
        let index = AvailabilityIndex::build(&[arrival("A", "1", "X")]);
        let mut selection = FilterSelection::new()
            .with(Dimension::Destination, "A")
            .with(Dimension::Station, "X");

        let result = selection.reconcile(&index);

        assert!(!result.changed());
        assert_eq!(selection.get(Dimension::Destination), Some("A"));
        assert_eq!(selection.get(Dimension::Station), Some("X"));
    }

    #[test]
    fn reconcile_clears_stale_station() {
        let index = AvailabilityIndex::build(&[arrival("A", "1", "X")]);
        let mut selection = FilterSelection::new()
            .with(Dimension::Line, "1")
            .with(Dimension::Station, "Z");

        let result = selection.reconcile(&index);

        assert!(result.changed());
        assert!(result.was_cleared(Dimension::Station));
        assert!(!result.was_cleared(Dimension::Line));
        assert_eq!(result.cleared(), &[(Dimension::Station, "Z".to_string())]);
        assert_eq!(selection.get(Dimension::Station), None);
        assert_eq!(selection.get(Dimension::Line), Some("1"));
    }

    #[test]
    fn reconcile_against_empty_snapshot_clears_everything() {
        let index = AvailabilityIndex::build(&[]);
        let mut selection = FilterSelection::new()
            .with(Dimension::Destination, "A")
            .with(Dimension::Line, "1")
            .with(Dimension::Station, "X");

        let result = selection.reconcile(&index);

        assert_eq!(result.cleared().len(), 3);
        assert!(selection.is_empty());
    }

    #[test]
    fn ids_are_checked_in_their_own_dimension() {
        // "X" is a station, not a line.
        let index = AvailabilityIndex::build(&[arrival("A", "1", "X")]);
        let mut selection = FilterSelection::new().with(Dimension::Line, "X");

        selection.reconcile(&index);

        assert_eq!(selection.get(Dimension::Line), None);
    }

    #[test]
    fn matches_is_a_conjunction() {
        let record = arrival("A", "1", "X");

        assert!(FilterSelection::new().matches(&record));
        assert!(FilterSelection::new().with(Dimension::Line, "1").matches(&record));
        assert!(
            FilterSelection::new()
                .with(Dimension::Destination, "A")
                .with(Dimension::Line, "1")
                .with(Dimension::Station, "X")
                .matches(&record)
        );
        assert!(
            !FilterSelection::new()
                .with(Dimension::Destination, "A")
                .with(Dimension::Station, "Y")
                .matches(&record)
        );
    }
}
