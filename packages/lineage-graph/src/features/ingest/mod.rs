//! Lineage Ingest
//!
//! Turns parsed source rows into enriched, shared records. Incomplete
//! rows and non-warehouse rows are dropped and counted, never reported as
//! errors.

mod loader;
mod raw_row;

pub use loader::{enrich, load_records, load_records_from_json, normalize_row, LoadReport};
pub use raw_row::RawLineageRow;
