//! Typed lineage graph
//!
//! Node kinds form a closed enum; ids are derived from domain keys so that
//! transforming the same records twice yields the same ids.

use crate::shared::models::{Position, RecordRef};
use serde::Serialize;

/// Kind of a hierarchical lineage node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LineageNodeKind {
    /// Upstream NetSuite record type
    NetsuiteSource,
    PhysicalTable,
    PhysicalColumn,
    PresentationColumn,
    /// Presentation column fed only by warehouse-generated tables
    DerivedColumn,
}

impl LineageNodeKind {
    /// Presentation-side nodes end the pipeline and share the last rank
    pub fn is_presentation(&self) -> bool {
        match self {
            Self::PresentationColumn | Self::DerivedColumn => true,
            Self::NetsuiteSource | Self::PhysicalTable | Self::PhysicalColumn => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetsuiteSource => "netsuiteSource",
            Self::PhysicalTable => "physicalTable",
            Self::PhysicalColumn => "physicalColumn",
            Self::PresentationColumn => "presentationColumn",
            Self::DerivedColumn => "derivedColumn",
        }
    }
}

// Node id builders
pub(crate) fn source_node_id(record_type: &str) -> String {
    format!("ns-source-{}", record_type)
}

pub(crate) fn physical_table_node_id(table: &str) -> String {
    format!("phys-table-{}", table)
}

pub(crate) fn physical_column_node_id(table: &str, column: &str) -> String {
    format!("phys-col-{}.{}", table, column)
}

pub(crate) fn presentation_column_node_id(table: &str, column: &str) -> String {
    format!("pres-col-{}::{}", table, column)
}

pub(crate) fn edge_id(source: &str, target: &str) -> String {
    format!("e-{}->{}", source, target)
}

/// Node of the hierarchical graph; `position` is the box's top-left corner
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub kind: LineageNodeKind,
    pub label: String,
    pub sublabel: Option<String>,
    pub records: Vec<RecordRef>,
    pub position: Position,
    pub width: f64,
    pub height: f64,
}

impl GraphNode {
    pub fn center(&self) -> Position {
        Position::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Output of the hierarchical transform
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineageGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl LineageGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn nodes_of_kind(&self, kind: LineageNodeKind) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    pub fn count_of_kind(&self, kind: LineageNodeKind) -> usize {
        self.nodes_of_kind(kind).count()
    }
}
