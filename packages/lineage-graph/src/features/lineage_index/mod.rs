//! Lineage Index
//!
//! Lookup maps and sorted aggregates over the full record list. Built once
//! in a single pass, read-only afterwards. Every record sits in exactly one
//! bucket of each lookup map; missing keys answer with an empty slice.

mod builder;
mod domain;

pub use builder::LineageIndex;
pub use domain::{IndexStats, PhysicalTableInfo, PresentationTableInfo, SubjectAreaInfo};
