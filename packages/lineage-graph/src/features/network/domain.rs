//! Star network models

use crate::shared::models::{Position, TableCategory};
use serde::Serialize;

/// Star-schema role of a physical table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeRole {
    PrimaryFact,
    SecondaryFact,
    Dimension,
}

/// One physical table in the force simulation.
///
/// Position and velocity are mutated in place by the simulation that owns
/// the node. `fx`/`fy` pin the node: the integrator snaps it there every
/// tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkNode {
    /// Physical table name
    pub id: String,
    pub role: NodeRole,
    pub category: TableCategory,
    pub radius: f64,
    pub record_count: usize,
    pub column_count: usize,
    pub presentation_table_count: usize,

    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub fx: Option<f64>,
    pub fy: Option<f64>,
}

impl NetworkNode {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn is_pinned(&self) -> bool {
        self.fx.is_some() || self.fy.is_some()
    }

    pub fn pin(&mut self, x: f64, y: f64) {
        self.fx = Some(x);
        self.fy = Some(y);
    }

    pub fn unpin(&mut self) {
        self.fx = None;
        self.fy = None;
    }
}

/// Link between two nodes, by index into `Network::nodes`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkLink {
    pub source: usize,
    pub target: usize,
}

/// How the primary fact was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum PrimarySelection {
    /// Best name match against the subject area
    NameMatch { score: u32 },
    /// No name matched; first fact table promoted
    FirstSecondaryFact,
    /// No fact table at all; most-connected table promoted
    MostConnected,
}

/// Target ring radii around the primary fact
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RingRadii {
    pub secondary: f64,
    pub dimension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub records: usize,
    pub tables: usize,
    pub excluded_tables: usize,
    pub secondary_facts: usize,
    pub dimensions: usize,
    pub primary_selection: PrimarySelection,
}

/// Star network of one subject area. Node 0 is always the primary fact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub subject_area: String,
    pub nodes: Vec<NetworkNode>,
    pub links: Vec<NetworkLink>,
    pub rings: RingRadii,
    pub stats: NetworkStats,
}

impl Network {
    pub const PRIMARY: usize = 0;

    pub fn primary(&self) -> &NetworkNode {
        &self.nodes[Self::PRIMARY]
    }

    pub fn node(&self, table: &str) -> Option<&NetworkNode> {
        self.nodes.iter().find(|n| n.id == table)
    }

    pub fn count_of_role(&self, role: NodeRole) -> usize {
        self.nodes.iter().filter(|n| n.role == role).count()
    }
}

/// Result of building a network. `Empty` is a terminal state (no physical
/// tables), distinct from "not computed yet".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum NetworkBuild {
    Empty { subject_area: String },
    Ready(Network),
}

impl NetworkBuild {
    pub fn is_empty(&self) -> bool {
        matches!(self, NetworkBuild::Empty { .. })
    }

    pub fn network(&self) -> Option<&Network> {
        match self {
            NetworkBuild::Ready(network) => Some(network),
            NetworkBuild::Empty { .. } => None,
        }
    }

    pub fn into_network(self) -> Option<Network> {
        match self {
            NetworkBuild::Ready(network) => Some(network),
            NetworkBuild::Empty { .. } => None,
        }
    }
}
