//! Shared domain models
//!
//! - `record`: lineage records and their inferred upstream source
//! - `category`: physical table categories derived from naming suffixes
//! - `geometry`: positions, viewports and chrome insets

pub mod category;
pub mod geometry;
pub mod record;

pub use category::TableCategory;
pub use geometry::{ChromeInsets, Position, Viewport};
pub use record::{
    presentation_column_key, presentation_table_key, EnrichedLineageRecord, InferredSource,
    LineageRecord, RecordRef, KEY_SEPARATOR,
};
