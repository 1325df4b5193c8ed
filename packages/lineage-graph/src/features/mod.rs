//! Feature modules - one vertical slice per engine
//!
//! Data flows leaf → root:
//! - ingest         - raw rows → enriched records
//! - inference      - naming-convention inference (pure)
//! - lineage_index  - lookup maps and aggregates
//! - hierarchy      - typed graph + layered layout (per presentation table)
//! - network        - star network + force simulation (per subject area)
//! - search         - full-text index over the same record store

pub mod inference;
pub mod ingest;
pub mod lineage_index;

// Layout engines
pub mod hierarchy;
pub mod network;

pub mod search;
