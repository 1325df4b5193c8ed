//! Records → typed lineage graph
//!
//! Pipeline: NetSuite source → physical table → (physical column) →
//! presentation column. Groupings keep first-seen order, which makes the
//! output a deterministic function of input order.

use super::domain::*;
use super::layered_layout::LayeredLayout;
use crate::config::HierarchyLayoutConfig;
use crate::features::inference::InferenceRules;
use crate::shared::models::{Position, RecordRef};
use ahash::{AHashMap, AHashSet};
use std::collections::BTreeSet;
use tracing::debug;

/// Records grouped by key, groups in first-seen order
struct Grouping {
    slots: AHashMap<String, usize>,
    groups: Vec<(String, Vec<RecordRef>)>,
}

impl Grouping {
    fn new() -> Self {
        Self {
            slots: AHashMap::new(),
            groups: Vec::new(),
        }
    }

    fn add(&mut self, key: String, record: &RecordRef) {
        match self.slots.get(&key) {
            Some(&slot) => self.groups[slot].1.push(record.clone()),
            None => {
                self.slots.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![record.clone()]));
            }
        }
    }
}

/// Deduplicating edge list
struct EdgeSet {
    seen: AHashSet<(String, String)>,
    edges: Vec<GraphEdge>,
}

impl EdgeSet {
    fn new() -> Self {
        Self {
            seen: AHashSet::new(),
            edges: Vec::new(),
        }
    }

    fn add(&mut self, source: String, target: String) {
        if self.seen.insert((source.clone(), target.clone())) {
            self.edges.push(GraphEdge {
                id: edge_id(&source, &target),
                source,
                target,
            });
        }
    }
}

/// Hierarchical graph transformer
#[derive(Debug, Clone, Default)]
pub struct HierarchyTransformer {
    layout: HierarchyLayoutConfig,
    rules: InferenceRules,
}

impl HierarchyTransformer {
    pub fn new(layout: HierarchyLayoutConfig) -> Self {
        Self {
            layout,
            rules: InferenceRules::default(),
        }
    }

    pub fn with_rules(layout: HierarchyLayoutConfig, rules: InferenceRules) -> Self {
        Self { layout, rules }
    }

    pub fn layout_config(&self) -> &HierarchyLayoutConfig {
        &self.layout
    }

    /// Build the typed graph for `records` and lay it out left to right
    pub fn transform(&self, records: &[RecordRef], include_physical_columns: bool) -> LineageGraph {
        if records.is_empty() {
            return LineageGraph::default();
        }

        let mut sources = Grouping::new();
        let mut tables = Grouping::new();
        let mut columns = Grouping::new();
        let mut presentation = Grouping::new();

        for record in records {
            if !record.inferred.is_nsaw_generated() {
                if let Some(record_type) = record.inferred.record_type() {
                    sources.add(record_type.to_string(), record);
                }
            }
            tables.add(record.physical_table.clone(), record);
            if include_physical_columns {
                columns.add(
                    physical_column_node_id(&record.physical_table, &record.physical_column),
                    record,
                );
            }
            presentation.add(
                presentation_column_node_id(
                    &record.presentation_table,
                    &record.presentation_column,
                ),
                record,
            );
        }

        let mut nodes: Vec<GraphNode> = Vec::with_capacity(
            sources.groups.len()
                + tables.groups.len()
                + columns.groups.len()
                + presentation.groups.len(),
        );

        for (record_type, members) in sources.groups {
            nodes.push(self.node(
                source_node_id(&record_type),
                LineageNodeKind::NetsuiteSource,
                record_type,
                Some("NetSuite record".to_string()),
                members,
            ));
        }

        for (table, members) in tables.groups {
            let column_count = members
                .iter()
                .map(|r| r.physical_column.as_str())
                .collect::<BTreeSet<_>>()
                .len();
            let noun = if column_count == 1 { "column" } else { "columns" };
            let sublabel = format!(
                "{} {}, {}",
                column_count,
                noun,
                self.rules.classify(&table)
            );
            nodes.push(self.node(
                physical_table_node_id(&table),
                LineageNodeKind::PhysicalTable,
                table,
                Some(sublabel),
                members,
            ));
        }

        for (id, members) in columns.groups {
            let first = &members[0];
            let label = first.physical_column.clone();
            let sublabel = first.inferred.field_name().map(str::to_string);
            nodes.push(self.node(id, LineageNodeKind::PhysicalColumn, label, sublabel, members));
        }

        for (id, members) in presentation.groups {
            let first = &members[0];
            let label = first.presentation_column.clone();
            let sublabel = Some(first.presentation_table.clone());
            let kind = if members.iter().all(|r| r.inferred.is_nsaw_generated()) {
                LineageNodeKind::DerivedColumn
            } else {
                LineageNodeKind::PresentationColumn
            };
            nodes.push(self.node(id, kind, label, sublabel, members));
        }

        let edges = self.edges(records, include_physical_columns);
        let mut graph = LineageGraph { nodes, edges };
        self.apply_layout(&mut graph);

        debug!(
            records = records.len(),
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            include_physical_columns,
            "hierarchical graph built"
        );

        graph
    }

    fn node(
        &self,
        id: String,
        kind: LineageNodeKind,
        label: String,
        sublabel: Option<String>,
        records: Vec<RecordRef>,
    ) -> GraphNode {
        GraphNode {
            id,
            kind,
            label,
            sublabel,
            records,
            position: Position::ORIGIN,
            width: self.layout.node_width,
            height: self.layout.node_height,
        }
    }

    fn edges(&self, records: &[RecordRef], include_physical_columns: bool) -> Vec<GraphEdge> {
        let mut edges = EdgeSet::new();

        for record in records {
            let table_id = physical_table_node_id(&record.physical_table);
            let presentation_id =
                presentation_column_node_id(&record.presentation_table, &record.presentation_column);

            if !record.inferred.is_nsaw_generated() {
                if let Some(record_type) = record.inferred.record_type() {
                    edges.add(source_node_id(record_type), table_id.clone());
                }
            }

            if include_physical_columns {
                let column_id =
                    physical_column_node_id(&record.physical_table, &record.physical_column);
                edges.add(table_id.clone(), column_id.clone());

                // Fact tables feed presentation columns directly
                if self.rules.classify(&record.physical_table).is_fact_like() {
                    edges.add(table_id, presentation_id);
                } else {
                    edges.add(column_id, presentation_id);
                }
            } else {
                edges.add(table_id, presentation_id);
            }
        }

        edges.edges
    }

    fn apply_layout(&self, graph: &mut LineageGraph) {
        let slots: AHashMap<&str, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();

        let index_edges: Vec<(usize, usize)> = graph
            .edges
            .iter()
            .filter_map(|e| Some((*slots.get(e.source.as_str())?, *slots.get(e.target.as_str())?)))
            .collect();

        let align_last: Vec<bool> = graph.nodes.iter().map(|n| n.kind.is_presentation()).collect();

        let centers = LayeredLayout::new(&self.layout).layout(&align_last, &index_edges);

        let half_w = self.layout.node_width / 2.0;
        let half_h = self.layout.node_height / 2.0;
        for (node, center) in graph.nodes.iter_mut().zip(centers) {
            node.position = Position::new(center.x - half_w, center.y - half_h);
        }
    }
}

/// Transform with the built-in inference rules
pub fn transform(
    records: &[RecordRef],
    include_physical_columns: bool,
    layout: &HierarchyLayoutConfig,
) -> LineageGraph {
    HierarchyTransformer::new(layout.clone()).transform(records, include_physical_columns)
}
