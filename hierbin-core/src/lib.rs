//! Core models shared by the hierbin crates.
//!
//! This crate holds the interval and region types that the bin-indexing
//! crates build on, plus the small amount of file plumbing needed to get
//! regions in and out of BED-like files.

pub mod errors;
pub mod models;
pub mod utils;
