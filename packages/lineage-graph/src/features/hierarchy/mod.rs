//! Hierarchical Graph Transformer
//!
//! Converts the records of one selection (typically a presentation table)
//! into typed nodes and edges, then positions them with a layered
//! left-to-right layout. Sources sit on the left, presentation columns on
//! the right.

mod domain;
mod layered_layout;
mod transformer;

pub use domain::{GraphEdge, GraphNode, LineageGraph, LineageNodeKind};
pub use layered_layout::LayeredLayout;
pub use transformer::{transform, HierarchyTransformer};
