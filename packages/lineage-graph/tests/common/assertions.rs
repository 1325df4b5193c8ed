//! Structural assertions shared by the integration tests

use lineage_graph::features::network::NetworkNode;
use lineage_graph::LineageGraph;
use std::collections::HashSet;

/// Every edge endpoint exists and node ids are unique
pub fn assert_well_formed(graph: &LineageGraph) {
    let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), graph.nodes.len(), "duplicate node ids");

    for edge in &graph.edges {
        assert!(ids.contains(edge.source.as_str()), "dangling source {}", edge.source);
        assert!(ids.contains(edge.target.as_str()), "dangling target {}", edge.target);
    }
}

pub fn assert_finite(nodes: &[NetworkNode]) {
    for node in nodes {
        assert!(
            node.x.is_finite() && node.y.is_finite(),
            "{} at ({}, {})",
            node.id,
            node.x,
            node.y
        );
        assert!(node.vx.is_finite() && node.vy.is_finite(), "{} velocity", node.id);
    }
}
