//! The three axes arrivals are classified and filtered by.

use std::fmt;

use serde::Serialize;

/// One of the filterable dimensions of an arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Destination,
    Line,
    Station,
}

impl Dimension {
    /// All dimensions, in form order.
    pub const ALL: [Dimension; 3] = [Dimension::Destination, Dimension::Line, Dimension::Station];

    /// The two dimensions other than this one.
    ///
    /// An option in this dimension is constrained by selections in these.
    pub fn others(self) -> [Dimension; 2] {
        match self {
            Dimension::Destination => [Dimension::Line, Dimension::Station],
            Dimension::Line => [Dimension::Destination, Dimension::Station],
            Dimension::Station => [Dimension::Destination, Dimension::Line],
        }
    }

    /// Query parameter / form field name.
    pub fn param_name(self) -> &'static str {
        match self {
            Dimension::Destination => "destination",
            Dimension::Line => "line",
            Dimension::Station => "station",
        }
    }

    /// Human-readable label for form controls.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Destination => "Destination",
            Dimension::Line => "Line",
            Dimension::Station => "Station",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn others_never_contains_self() {
        for dim in Dimension::ALL {
            let others = dim.others();
            assert!(!others.contains(&dim));
            assert_ne!(others[0], others[1]);
        }
    }

    #[test]
    fn display_uses_param_name() {
        assert_eq!(Dimension::Destination.to_string(), "destination");
        assert_eq!(Dimension::Line.to_string(), "line");
        assert_eq!(Dimension::Station.to_string(), "station");
    }
}
