//! Conversion from MARTA DTOs to domain types.

use tracing::warn;

use crate::domain::{ArrivalRecord, Direction, WaitingSeconds};

use super::types::RailArrival;

/// Error converting one feed row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A required id was missing or blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Direction wasn't one of N/S/E/W
    #[error(transparent)]
    InvalidDirection(#[from] crate::domain::InvalidDirection),
}

/// Convert a whole feed response, skipping rows that fail validation.
///
/// A single bad row never fails the snapshot.
pub fn convert_arrivals(rows: &[RailArrival]) -> Vec<ArrivalRecord> {
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        match convert_arrival(row) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(
                    train_id = row.train_id.as_deref().unwrap_or("?"),
                    station = %row.station,
                    error = %e,
                    "skipping arrival"
                );
            }
        }
    }

    records
}

/// Convert a single feed row.
///
/// Ids are kept verbatim because they are the keys the filters compare on.
/// The waiting-seconds field is parsed leniently: see [`WaitingSeconds`].
pub fn convert_arrival(row: &RailArrival) -> Result<ArrivalRecord, ConversionError> {
    let destination = required(&row.destination, "DESTINATION")?;
    let line = required(&row.line, "LINE")?;
    let station = required(&row.station, "STATION")?;
    let direction = Direction::parse(&row.direction)?;

    Ok(ArrivalRecord {
        destination,
        line,
        station,
        waiting_seconds: WaitingSeconds::parse(&row.waiting_seconds),
        waiting_time: row.waiting_time.trim().to_string(),
        direction,
        train_id: non_blank(row.train_id.as_deref()),
        event_time: non_blank(row.event_time.as_deref()),
        next_arrival: non_blank(row.next_arr.as_deref()),
    })
}

fn required(value: &str, field: &'static str) -> Result<String, ConversionError> {
    if value.trim().is_empty() {
        Err(ConversionError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
