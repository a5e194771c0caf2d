//! Cross-filter availability index.
//!
//! For every distinct destination, line and station in a snapshot, records
//! which values of the *other two* dimensions appear alongside it in at least
//! one arrival. The resolver uses this co-occurrence graph to decide which
//! options are still reachable under a partial selection.

use std::collections::{HashMap, HashSet};

use crate::domain::{ArrivalRecord, Dimension, display_name};

/// One distinct value of one dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    /// Label shown in the option list.
    name: String,

    /// Raw ids from the other two dimensions that co-occur with this value.
    /// Never contains ids from this entry's own dimension.
    available: HashSet<String>,
}

impl OptionEntry {
    fn new(name: String) -> Self {
        Self {
            name,
            available: HashSet::new(),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All co-occurring ids.
    pub fn available(&self) -> &HashSet<String> {
        &self.available
    }

    /// Whether `id` co-occurs with this value in the snapshot.
    pub fn is_available(&self, id: &str) -> bool {
        self.available.contains(id)
    }
}

/// Option maps for all three dimensions, built from a single snapshot.
///
/// Co-occurrence is symmetric: if B is available for A, then A is available
/// for B.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityIndex {
    destinations: HashMap<String, OptionEntry>,
    lines: HashMap<String, OptionEntry>,
    stations: HashMap<String, OptionEntry>,
}

impl AvailabilityIndex {
    /// Build the index in a single pass over a snapshot's records.
    ///
    /// Each record gets or creates an entry in every dimension, then adds its
    /// other two ids to that entry. Repeated values only grow the sets.
    pub fn build(records: &[ArrivalRecord]) -> Self {
        let mut index = Self::default();

        for record in records {
            for dimension in Dimension::ALL {
                let id = record.value(dimension);
                let entry = index
                    .options_mut(dimension)
                    .entry(id.to_string())
                    .or_insert_with(|| OptionEntry::new(display_name(id)));

                for other in dimension.others() {
                    entry.available.insert(record.value(other).to_string());
                }
            }
        }

        index
    }

    /// All options of a dimension, keyed by raw id. Iteration order is
    /// unspecified.
    pub fn options(&self, dimension: Dimension) -> &HashMap<String, OptionEntry> {
        match dimension {
            Dimension::Destination => &self.destinations,
            Dimension::Line => &self.lines,
            Dimension::Station => &self.stations,
        }
    }

    fn options_mut(&mut self, dimension: Dimension) -> &mut HashMap<String, OptionEntry> {
        match dimension {
            Dimension::Destination => &mut self.destinations,
            Dimension::Line => &mut self.lines,
            Dimension::Station => &mut self.stations,
        }
    }

    /// Look up one option. `None` if the id isn't in this snapshot.
    pub fn entry(&self, dimension: Dimension, id: &str) -> Option<&OptionEntry> {
        self.options(dimension).get(id)
    }

    /// Whether the id is a known option of the dimension.
    pub fn contains(&self, dimension: Dimension, id: &str) -> bool {
        self.options(dimension).contains_key(id)
    }

    /// Display name for an id, falling back to the raw id when unknown.
    pub fn name_or_id<'a>(&'a self, dimension: Dimension, id: &'a str) -> &'a str {
        self.entry(dimension, id).map(|e| e.name()).unwrap_or(id)
    }

    /// Number of options in a dimension.
    pub fn len(&self, dimension: Dimension) -> usize {
        self.options(dimension).len()
    }

    /// Whether the index was built from an empty snapshot.
    pub fn is_empty(&self) -> bool {
        Dimension::ALL.iter().all(|&d| self.options(d).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, WaitingSeconds};

    fn arrival(dest: &str, line: &str, station: &str, wait: f64) -> ArrivalRecord {
        ArrivalRecord::new(
            dest,
            line,
            station,
            WaitingSeconds::from_secs(wait),
            format!("{} min", wait / 60.0),
            Direction::North,
        )
    }

    fn set(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_snapshot() {
        let index = AvailabilityIndex::build(&[]);

        assert!(index.is_empty());
        for dim in Dimension::ALL {
            assert_eq!(index.len(dim), 0);
        }
    }

    #[test]
    fn two_records_sharing_a_line() {
        let records = vec![arrival("A", "1", "X", 60.0), arrival("B", "1", "Y", 30.0)];
        let index = AvailabilityIndex::build(&records);

        let line = index.entry(Dimension::Line, "1").unwrap();
        assert_eq!(line.available(), &set(&["A", "B", "X", "Y"]));

        let a = index.entry(Dimension::Destination, "A").unwrap();
        assert_eq!(a.available(), &set(&["1", "X"]));

        let b = index.entry(Dimension::Destination, "B").unwrap();
        assert_eq!(b.available(), &set(&["1", "Y"]));

        let x = index.entry(Dimension::Station, "X").unwrap();
        assert_eq!(x.available(), &set(&["A", "1"]));
    }

    #[test]
    fn repeated_values_do_not_duplicate_entries() {
        let records = vec![
            arrival("DORAVILLE", "GOLD", "FIVE POINTS STATION", 60.0),
            arrival("DORAVILLE", "GOLD", "FIVE POINTS STATION", 240.0),
            arrival("DORAVILLE", "GOLD", "LINDBERGH STATION", 120.0),
        ];
        let index = AvailabilityIndex::build(&records);

        assert_eq!(index.len(Dimension::Destination), 1);
        assert_eq!(index.len(Dimension::Line), 1);
        assert_eq!(index.len(Dimension::Station), 2);

        let dest = index.entry(Dimension::Destination, "DORAVILLE").unwrap();
        assert_eq!(
            dest.available(),
            &set(&["GOLD", "FIVE POINTS STATION", "LINDBERGH STATION"])
        );
    }

    #[test]
    fn entries_use_display_names() {
        let records = vec![arrival("AIRPORT", "RED", "DOME STATION", 0.0)];
        let index = AvailabilityIndex::build(&records);

        assert_eq!(
            index.entry(Dimension::Station, "DOME STATION").unwrap().name(),
            "GWCC/CNN Center"
        );
        assert_eq!(index.entry(Dimension::Line, "RED").unwrap().name(), "Red");
        assert_eq!(index.name_or_id(Dimension::Destination, "AIRPORT"), "Airport");
        assert_eq!(index.name_or_id(Dimension::Destination, "NOWHERE"), "NOWHERE");
    }

    #[test]
    fn own_dimension_never_in_available() {
        let records = vec![
            arrival("A", "1", "X", 60.0),
            arrival("B", "2", "X", 60.0),
            arrival("A", "2", "Y", 60.0),
        ];
        let index = AvailabilityIndex::build(&records);

        for (id, entry) in index.options(Dimension::Station) {
            for other in index.options(Dimension::Station).keys() {
                assert!(
                    !entry.is_available(other),
                    "station {id} lists station {other}"
                );
            }
        }
    }

    #[test]
    fn unknown_id_has_no_entry() {
        let index = AvailabilityIndex::build(&[arrival("A", "1", "X", 60.0)]);
        assert!(index.entry(Dimension::Line, "2").is_none());
        assert!(!index.contains(Dimension::Line, "2"));
        assert!(index.contains(Dimension::Line, "1"));
    }
}
