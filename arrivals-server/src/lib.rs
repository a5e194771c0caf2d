//! MARTA rail arrivals board.
//!
//! Polls the MARTA real-time rail feed and serves a board where arrivals can
//! be filtered by destination, line and station. Filter options that would
//! produce an empty list are shown disabled, and selections that disappear
//! from the feed are reset.

pub mod config;
pub mod domain;
pub mod filters;
pub mod marta;
pub mod snapshot;
pub mod web;
