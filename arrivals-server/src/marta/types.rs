//! MARTA rail realtime API response DTOs.
//!
//! These map directly to the JSON served by `railrealtimearrivals`. Field
//! names are upper snake case. Every field is read leniently: missing, null
//! or oddly typed values never fail the whole body. Ids fall back to empty so
//! that validation happens per row in one place (see `convert`).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One row of the realtime arrivals feed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct RailArrival {
    /// Terminus of the train, e.g. "Doraville".
    #[serde(default, deserialize_with = "lenient_string")]
    pub destination: String,

    /// N, S, E or W.
    #[serde(default, deserialize_with = "lenient_string")]
    pub direction: String,

    /// When the prediction was made, e.g. "3/14/2024 10:02:11 AM".
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub event_time: Option<String>,

    /// Line colour, e.g. "GOLD".
    #[serde(default, deserialize_with = "lenient_string")]
    pub line: String,

    /// Predicted arrival clock time, e.g. "10:05:40 AM".
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub next_arr: Option<String>,

    /// Station the train is arriving at, e.g. "FIVE POINTS STATION".
    #[serde(default, deserialize_with = "lenient_string")]
    pub station: String,

    /// Train number.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub train_id: Option<String>,

    /// Seconds until arrival. Sent as a string, sometimes as a number.
    #[serde(default, deserialize_with = "lenient_string")]
    pub waiting_seconds: String,

    /// Human-readable wait, e.g. "3 min", "Arriving", "Boarding".
    #[serde(default, deserialize_with = "lenient_string")]
    pub waiting_time: String,
}

/// Top-level response. Older deployments send a bare array; newer ones wrap
/// it in an object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RailArrivalsResponse {
    Bare(Vec<RailArrival>),
    Wrapped {
        #[serde(rename = "RailArrivals")]
        rail_arrivals: Vec<RailArrival>,
    },
}

impl RailArrivalsResponse {
    pub fn into_arrivals(self) -> Vec<RailArrival> {
        match self {
            RailArrivalsResponse::Bare(arrivals) => arrivals,
            RailArrivalsResponse::Wrapped { rail_arrivals } => rail_arrivals,
        }
    }
}

/// Strings as-is, numbers and booleans as text, anything else as `None`.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(scalar_text)
}
