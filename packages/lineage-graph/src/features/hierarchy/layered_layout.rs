//! Layered (Sugiyama-style) left-to-right layout
//!
//! Phases:
//!   1. Cycle breaking (DFS back edges are ignored)
//!   2. Rank assignment (longest path, sinks aligned last, nodes pulled
//!      toward their successors)
//!   3. Crossing reduction (barycenter sweeps)
//!   4. Coordinate assignment (ranks are columns, each column centered)
//!
//! Nodes are fixed-size boxes; the result holds box centers.

use crate::config::HierarchyLayoutConfig;
use crate::shared::models::Position;
use ahash::AHashSet;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{depth_first_search, DfsEvent};
use petgraph::Direction;
use tracing::debug;

pub struct LayeredLayout<'a> {
    config: &'a HierarchyLayoutConfig,
}

impl<'a> LayeredLayout<'a> {
    pub fn new(config: &'a HierarchyLayoutConfig) -> Self {
        Self { config }
    }

    /// Lay out `align_last.len()` nodes connected by `edges` (index pairs).
    ///
    /// `align_last[i]` moves sink node `i` to the last rank. Out-of-range
    /// edges and self loops are ignored.
    pub fn layout(&self, align_last: &[bool], edges: &[(usize, usize)]) -> Vec<Position> {
        let n = align_last.len();
        if n == 0 {
            return Vec::new();
        }

        let dag = build_acyclic(n, edges);
        let order = match toposort(&dag, None) {
            Ok(order) => order,
            // Unreachable after back-edge removal; keep input order
            Err(_) => dag.node_indices().collect(),
        };

        let ranks = assign_ranks(&dag, &order, align_last);
        let layers = self.order_layers(&dag, &ranks);
        let centers = self.assign_coordinates(n, &layers);

        debug!(
            nodes = n,
            edges = dag.edge_count(),
            ranks = layers.len(),
            "layered layout computed"
        );

        centers
    }

    /// Phase 3: barycenter sweeps, alternating down and up
    fn order_layers(&self, dag: &DiGraph<(), ()>, ranks: &[usize]) -> Vec<Vec<NodeIndex>> {
        let rank_count = ranks.iter().copied().max().map_or(0, |m| m + 1);
        let mut layers: Vec<Vec<NodeIndex>> = vec![Vec::new(); rank_count];
        for node in dag.node_indices() {
            layers[ranks[node.index()]].push(node);
        }

        // slot[node] = position of node inside its layer
        let mut slot = vec![0.0_f64; ranks.len()];
        for layer in &layers {
            for (i, node) in layer.iter().enumerate() {
                slot[node.index()] = i as f64;
            }
        }

        for sweep in 0..self.config.crossing_sweeps {
            let (direction, rank_order): (Direction, Vec<usize>) = if sweep % 2 == 0 {
                (Direction::Incoming, (1..rank_count).collect())
            } else {
                (Direction::Outgoing, (0..rank_count.saturating_sub(1)).rev().collect())
            };

            for r in rank_order {
                let keys: Vec<f64> = layers[r]
                    .iter()
                    .map(|&node| {
                        let (sum, count) = dag
                            .neighbors_directed(node, direction)
                            .fold((0.0, 0usize), |(sum, count), nb| {
                                (sum + slot[nb.index()], count + 1)
                            });
                        if count == 0 {
                            slot[node.index()]
                        } else {
                            sum / count as f64
                        }
                    })
                    .collect();

                let mut keyed: Vec<(f64, NodeIndex)> =
                    keys.into_iter().zip(layers[r].iter().copied()).collect();
                // Stable: equal barycenters keep their current order
                keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
                layers[r] = keyed.into_iter().map(|(_, node)| node).collect();

                for (i, node) in layers[r].iter().enumerate() {
                    slot[node.index()] = i as f64;
                }
            }
        }

        layers
    }

    /// Phase 4: one column per rank, every column centered vertically
    fn assign_coordinates(&self, n: usize, layers: &[Vec<NodeIndex>]) -> Vec<Position> {
        let c = self.config;
        let column_height =
            |count: usize| count as f64 * c.node_height + count.saturating_sub(1) as f64 * c.node_sep;
        let tallest = layers.iter().map(|l| column_height(l.len())).fold(0.0, f64::max);

        let mut centers = vec![Position::ORIGIN; n];
        for (rank, layer) in layers.iter().enumerate() {
            let x = c.margin_x + rank as f64 * (c.node_width + c.rank_sep) + c.node_width / 2.0;
            let top = c.margin_y + (tallest - column_height(layer.len())) / 2.0;
            for (i, node) in layer.iter().enumerate() {
                let y = top + i as f64 * (c.node_height + c.node_sep) + c.node_height / 2.0;
                centers[node.index()] = Position::new(x, y);
            }
        }
        centers
    }
}

/// Phase 1: drop DFS back edges, self loops and duplicates
fn build_acyclic(n: usize, edges: &[(usize, usize)]) -> DiGraph<(), ()> {
    let mut full: DiGraph<(), ()> = DiGraph::with_capacity(n, edges.len());
    for _ in 0..n {
        full.add_node(());
    }
    let mut seen: AHashSet<(usize, usize)> = AHashSet::new();
    for &(s, t) in edges {
        if s < n && t < n && s != t && seen.insert((s, t)) {
            full.add_edge(NodeIndex::new(s), NodeIndex::new(t), ());
        }
    }

    let mut back_edges: AHashSet<(NodeIndex, NodeIndex)> = AHashSet::new();
    depth_first_search(&full, full.node_indices(), |event| {
        if let DfsEvent::BackEdge(u, v) = event {
            back_edges.insert((u, v));
        }
    });

    if back_edges.is_empty() {
        return full;
    }

    debug!(ignored = back_edges.len(), "breaking cycles in layered layout");
    full.filter_map(
        |_, _| Some(()),
        |edge, _| {
            full.edge_endpoints(edge)
                .filter(|endpoints| !back_edges.contains(endpoints))
                .map(|_| ())
        },
    )
}

/// Phase 2: longest-path ranks, then alignment
fn assign_ranks(dag: &DiGraph<(), ()>, order: &[NodeIndex], align_last: &[bool]) -> Vec<usize> {
    let mut ranks = vec![0usize; dag.node_count()];

    for &node in order {
        ranks[node.index()] = dag
            .neighbors_directed(node, Direction::Incoming)
            .map(|p| ranks[p.index()] + 1)
            .max()
            .unwrap_or(0);
    }

    let is_sink = |node: NodeIndex| dag.neighbors_directed(node, Direction::Outgoing).next().is_none();

    // Aligned sinks share the last rank
    let last = ranks.iter().copied().max().unwrap_or(0);
    for node in dag.node_indices() {
        if align_last[node.index()] && is_sink(node) {
            ranks[node.index()] = last;
        }
    }

    // Pull every other node next to its nearest successor
    for &node in order.iter().rev() {
        if align_last[node.index()] && is_sink(node) {
            continue;
        }
        if let Some(nearest) = dag
            .neighbors_directed(node, Direction::Outgoing)
            .map(|s| ranks[s.index()])
            .min()
        {
            ranks[node.index()] = nearest.saturating_sub(1).max(ranks[node.index()]);
        }
    }

    ranks
}
