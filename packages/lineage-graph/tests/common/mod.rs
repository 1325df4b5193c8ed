//! Common test utilities for lineage-graph
//!
//! Shared fixtures and assertions for the integration tests.

#![allow(dead_code)]

mod assertions;
mod fixtures;

// Re-export all utilities
pub use assertions::*;
pub use fixtures::*;

/// Route `tracing` output to the test harness; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
