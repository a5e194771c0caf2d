//! Domain types for the arrivals board.
//!
//! Arrival records are validated at the feed boundary, so code that receives
//! these types can trust that every record has all three ids and a known
//! direction.

mod arrival;
mod dimension;
mod names;

pub use arrival::{ArrivalRecord, Direction, InvalidDirection, WaitingSeconds};
pub use dimension::Dimension;
pub use names::display_name;
