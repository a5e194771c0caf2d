//! Data transfer objects for web requests and responses.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{ArrivalRecord, Dimension, Direction};
use crate::filters::{AvailabilityIndex, FilterSelection, OptionState, Reconciliation};

/// Query parameters shared by the board endpoints.
///
/// Empty values (`?station=`) mean "unset", which is what an "Any" choice in
/// the filter form submits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BoardQuery {
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub destination: Option<String>,

    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub line: Option<String>,

    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub station: Option<String>,

    /// 1-based page number (defaults to 1)
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub page: Option<usize>,
}

impl BoardQuery {
    /// Query for a selection and page.
    pub fn from_parts(selection: &FilterSelection, page: usize) -> Self {
        Self {
            destination: selection.destination.clone(),
            line: selection.line.clone(),
            station: selection.station.clone(),
            page: Some(page),
        }
    }

    /// The requested selection (not yet reconciled).
    pub fn selection(&self) -> FilterSelection {
        let mut selection = FilterSelection::new();
        selection.set(Dimension::Destination, self.destination.clone());
        selection.set(Dimension::Line, self.line.clone());
        selection.set(Dimension::Station, self.station.clone());
        selection
    }

    /// The requested page (not yet clamped).
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }

    /// URL-encoded form, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self).unwrap_or_default()
    }
}

fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// An arrival in API responses.
#[derive(Debug, Serialize)]
pub struct ArrivalResult {
    pub destination: String,
    pub destination_name: String,
    pub line: String,
    pub line_name: String,
    pub station: String,
    pub station_name: String,
    pub direction: Direction,
    /// Seconds until arrival; null if the feed value was unparsable
    pub waiting_seconds: Option<f64>,
    pub waiting_time: String,
    pub train_id: Option<String>,
    pub event_time: Option<String>,
    pub next_arrival: Option<String>,
}

impl ArrivalResult {
    /// Create from a domain record, naming ids through the index.
    pub fn from_record(record: &ArrivalRecord, index: &AvailabilityIndex) -> Self {
        Self {
            destination: record.destination.clone(),
            destination_name: index
                .name_or_id(Dimension::Destination, &record.destination)
                .to_string(),
            line: record.line.clone(),
            line_name: index.name_or_id(Dimension::Line, &record.line).to_string(),
            station: record.station.clone(),
            station_name: index.name_or_id(Dimension::Station, &record.station).to_string(),
            direction: record.direction,
            waiting_seconds: record.waiting_seconds.secs(),
            waiting_time: record.waiting_time.clone(),
            train_id: record.train_id.clone(),
            event_time: record.event_time.clone(),
            next_arrival: record.next_arrival.clone(),
        }
    }
}

/// A selection that was reset because its value left the snapshot.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ClearedSelection {
    pub dimension: Dimension,
    pub id: String,
}

impl ClearedSelection {
    pub fn from_reconciliation(reconciliation: &Reconciliation) -> Vec<Self> {
        reconciliation
            .cleared()
            .iter()
            .map(|(dimension, id)| Self {
                dimension: *dimension,
                id: id.clone(),
            })
            .collect()
    }
}

/// Response for the arrival list.
#[derive(Debug, Serialize)]
pub struct ArrivalsResponse {
    /// The selection actually applied, after reconciliation
    pub selection: FilterSelection,
    /// Requested selections that were dropped
    pub cleared: Vec<ClearedSelection>,
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    /// Matching arrivals across all pages
    pub total: usize,
    /// Arrivals on this page, soonest first
    pub arrivals: Vec<ArrivalResult>,
    pub fetched_at: Option<String>,
}

/// Response for the filter options.
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub selection: FilterSelection,
    pub cleared: Vec<ClearedSelection>,
    pub destinations: Vec<OptionState>,
    pub lines: Vec<OptionState>,
    pub stations: Vec<OptionState>,
}

/// Response for an on-demand refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Number of arrivals in the new snapshot
    pub arrivals: usize,
    pub fetched_at: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// RFC 3339 timestamp for JSON responses.
pub fn format_timestamp(time: Option<DateTime<Local>>) -> Option<String> {
    time.map(|t| t.to_rfc3339())
}
