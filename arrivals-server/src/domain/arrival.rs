//! Arrival records as seen on a snapshot.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use super::Dimension;

/// Error returned when parsing an invalid direction indicator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction: {0:?} (expected N, S, E or W)")]
pub struct InvalidDirection(pub String);

/// Direction of travel reported by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "W")]
    West,
}

impl Direction {
    /// Parse a single-letter direction code. Case-insensitive.
    pub fn parse(s: &str) -> Result<Self, InvalidDirection> {
        match s.trim() {
            "N" | "n" => Ok(Direction::North),
            "S" | "s" => Ok(Direction::South),
            "E" | "e" => Ok(Direction::East),
            "W" | "w" => Ok(Direction::West),
            other => Err(InvalidDirection(other.to_string())),
        }
    }

    /// The single-letter code.
    pub fn code(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
        }
    }

    /// Long label, e.g. "Northbound".
    pub fn label(self) -> &'static str {
        match self {
            Direction::North => "Northbound",
            Direction::South => "Southbound",
            Direction::East => "Eastbound",
            Direction::West => "Westbound",
        }
    }

    /// Arrow glyph for compact display.
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::North => "↑",
            Direction::South => "↓",
            Direction::East => "→",
            Direction::West => "←",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Waiting time in seconds, as used for sorting.
///
/// The feed sends this as a string. Values that don't parse to a finite
/// number are kept as "unknown" and order after every known wait, so a bad
/// row sinks to the bottom of the list instead of breaking the sort.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaitingSeconds(Option<f64>);

impl WaitingSeconds {
    /// An unknown waiting time.
    pub const UNKNOWN: WaitingSeconds = WaitingSeconds(None);

    /// Parse the raw feed value. Never fails; see type docs.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(secs) => Self::from_secs(secs),
            Err(_) => Self::UNKNOWN,
        }
    }

    /// Wrap a number of seconds. Non-finite values become unknown.
    pub fn from_secs(secs: f64) -> Self {
        if secs.is_finite() {
            Self(Some(secs))
        } else {
            Self::UNKNOWN
        }
    }

    /// The number of seconds, if known.
    pub fn secs(self) -> Option<f64> {
        self.0
    }

    pub fn is_known(self) -> bool {
        self.0.is_some()
    }
}

// Finite values only, so total_cmp agrees with ==.
impl Eq for WaitingSeconds {}

impl Ord for WaitingSeconds {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for WaitingSeconds {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One scheduled arrival of a train at a station.
///
/// Records are immutable and belong to the snapshot they came from; a new
/// snapshot replaces them wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrivalRecord {
    /// Raw destination id, e.g. "DORAVILLE".
    pub destination: String,

    /// Raw line id, e.g. "GOLD".
    pub line: String,

    /// Raw station id, e.g. "FIVE POINTS STATION".
    pub station: String,

    /// Waiting time used for ordering.
    pub waiting_seconds: WaitingSeconds,

    /// Waiting time as shown to riders, e.g. "3 min" or "Arriving".
    pub waiting_time: String,

    /// Direction of travel.
    pub direction: Direction,

    /// Train number, when the feed provides one.
    pub train_id: Option<String>,

    /// Time the feed generated this prediction.
    pub event_time: Option<String>,

    /// Predicted arrival clock time.
    pub next_arrival: Option<String>,
}

impl ArrivalRecord {
    /// Build a record with the required fields; optional fields are empty.
    pub fn new(
        destination: impl Into<String>,
        line: impl Into<String>,
        station: impl Into<String>,
        waiting_seconds: WaitingSeconds,
        waiting_time: impl Into<String>,
        direction: Direction,
    ) -> Self {
        Self {
            destination: destination.into(),
            line: line.into(),
            station: station.into(),
            waiting_seconds,
            waiting_time: waiting_time.into(),
            direction,
            train_id: None,
            event_time: None,
            next_arrival: None,
        }
    }

    /// The raw id of this record in the given dimension.
    pub fn value(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Destination => &self.destination,
            Dimension::Line => &self.line,
            Dimension::Station => &self.station,
        }
    }
}
