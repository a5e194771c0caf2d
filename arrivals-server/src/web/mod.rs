//! Web layer for the arrivals board.
//!
//! Serves the filterable board page, the list fragment and JSON endpoints.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
