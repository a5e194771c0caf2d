//! MARTA rail realtime arrivals feed.
//!
//! The feed is a single endpoint returning every predicted arrival across
//! the network. Each fetch is treated as a full replacement snapshot.
//!
//! Key characteristics:
//! - Authentication is an `apiKey` query parameter
//! - Field names are upper snake case (`WAITING_SECONDS`, ...)
//! - There is no lookup API for station or destination names, so display
//!   names are derived from the ids

mod client;
mod convert;
mod error;
mod mock;
mod source;
mod types;

pub use client::{DEFAULT_BASE_URL, MartaClient, MartaConfig};
pub use convert::{ConversionError, convert_arrival, convert_arrivals};
pub use error::MartaError;
pub use mock::MockMartaClient;
pub use source::{ArrivalProvider, ArrivalSource};
pub use types::{RailArrival, RailArrivalsResponse};
