/*
 * Lineage Graph - Field-level lineage exploration core
 *
 * Feature-First Architecture:
 * - shared/      : Common models (records, geometry)
 * - features/    : Vertical slices (ingest → inference → index → hierarchy / network, search)
 * - config/      : Tunable constants (YAML v1, presets)
 * - usecases/    : Explorer facade consumed by the rendering layer
 *
 * Execution model:
 * - Single-threaded, synchronous
 * - The force simulation advances one tick per host animation frame
 */

#![allow(clippy::too_many_arguments)] // Force kernels take the full node state
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::needless_range_loop)] // Pairwise force loops index both sides

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

/// Usecase layer (LineageExplorer)
pub mod usecases;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{LineageConfig, Preset};
pub use errors::{LineageError, Result};
pub use features::hierarchy::{transform, HierarchyTransformer, LineageGraph, LineageNodeKind};
pub use features::inference::{
    classify_physical_table, infer_field_name, infer_record_type, inferred_source, is_generated,
};
pub use features::ingest::{load_records, RawLineageRow};
pub use features::lineage_index::LineageIndex;
pub use features::network::{
    fit_to_viewport, InteractionState, NetworkBuild, NetworkBuilder, PointerEvent, Simulation,
    SimulationController, SimulationStatus, SimulationTicket, ViewTransform,
};
pub use features::search::{group_by_kind, SearchIndex, SearchResult, SearchResultKind};
pub use shared::models::{
    ChromeInsets, EnrichedLineageRecord, InferredSource, LineageRecord, Position, RecordRef,
    TableCategory, Viewport,
};
pub use usecases::{LineageExplorer, LoadSummary};
