//! Usecase Layer - one entry point for the rendering layer
//!
//! Wires ingest, indexes, graph transforms and the network simulation
//! together under a single validated `LineageConfig`.

pub mod explorer;

// Re-export main API
pub use explorer::{LineageExplorer, LoadSummary};
