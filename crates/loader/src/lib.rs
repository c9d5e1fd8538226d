//! Startup loading of the precomputed tables into the in-memory stores.

#![warn(clippy::unwrap_used)]

pub mod bootstrap;
pub mod table;

pub use bootstrap::{load_engine, LoadReport, SourceStatus};
pub use table::{read_records, read_table};
