//! Star network construction
//!
//! 1. Drop auxiliary and raw-query pseudo tables
//! 2. Pick the primary fact (name match → first fact → most connected)
//! 3. Remaining fact-like tables become secondary facts, the rest dimensions
//! 4. Link the primary to every other table
//! 5. Seed positions on concentric rings

use super::domain::*;
use super::scoring::{clean_table_name, match_score, subject_area_tokens, CleanedTable};
use super::seeding::seed_positions;
use crate::config::{ConfigResult, ForceConfig, InferenceConfig, NetworkConfig, Validatable};
use crate::features::inference::InferenceRules;
use crate::shared::models::{RecordRef, TableCategory, Viewport};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Per-table aggregate of the selected records
struct TableSummary {
    name: String,
    category: TableCategory,
    records: usize,
    columns: BTreeSet<String>,
    presentation_tables: BTreeSet<String>,
}

/// Builds star networks for subject-area selections
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    network: NetworkConfig,
    force: ForceConfig,
    inference: InferenceConfig,
    rules: InferenceRules,
}

impl NetworkBuilder {
    /// Both sections are validated; simulations started from this builder
    /// reuse its force config unchecked.
    pub fn new(network: NetworkConfig, force: ForceConfig) -> ConfigResult<Self> {
        network.validate()?;
        force.validate()?;
        Ok(Self {
            network,
            force,
            inference: InferenceConfig::default(),
            rules: InferenceRules::default(),
        })
    }

    /// Use custom naming rules for classification and name cleaning
    pub fn with_inference(mut self, inference: InferenceConfig, rules: InferenceRules) -> Self {
        self.inference = inference;
        self.rules = rules;
        self
    }

    pub fn force_config(&self) -> &ForceConfig {
        &self.force
    }

    /// Raw SQL, expressions and auxiliary copies are not star members
    pub fn is_excluded(&self, table: &str) -> bool {
        let trimmed = table.trim();
        trimmed.is_empty()
            || trimmed.chars().any(|c| c.is_whitespace() || c == '(' || c == ')')
            || trimmed.to_uppercase().starts_with("SELECT")
            || self
                .network
                .excluded_table_markers
                .iter()
                .any(|marker| trimmed.to_uppercase().contains(&marker.to_uppercase()))
    }

    /// Build and seed the network of one subject area
    pub fn build(
        &self,
        records: &[RecordRef],
        subject_area: &str,
        viewport: Viewport,
    ) -> NetworkBuild {
        let mut excluded: BTreeSet<&str> = BTreeSet::new();
        let mut tables: BTreeMap<&str, TableSummary> = BTreeMap::new();

        for record in records {
            let name = record.physical_table.as_str();
            if self.is_excluded(name) {
                excluded.insert(name);
                continue;
            }
            let summary = tables.entry(name).or_insert_with(|| TableSummary {
                name: name.to_string(),
                category: self.rules.classify(name),
                records: 0,
                columns: BTreeSet::new(),
                presentation_tables: BTreeSet::new(),
            });
            summary.records += 1;
            summary.columns.insert(record.physical_column.clone());
            summary
                .presentation_tables
                .insert(record.presentation_table.clone());
        }

        if tables.is_empty() {
            info!(subject_area, excluded = excluded.len(), "no physical tables for subject area");
            return NetworkBuild::Empty {
                subject_area: subject_area.to_string(),
            };
        }

        let summaries: Vec<TableSummary> = tables.into_values().collect();
        let (primary, selection) = self.select_primary(&summaries, subject_area);

        let mut nodes: Vec<NetworkNode> = Vec::with_capacity(summaries.len());
        nodes.push(self.node(&summaries[primary], NodeRole::PrimaryFact));

        // Sorted by name within each role
        for (i, summary) in summaries.iter().enumerate() {
            if i != primary && summary.category.is_fact_like() {
                nodes.push(self.node(summary, NodeRole::SecondaryFact));
            }
        }
        for (i, summary) in summaries.iter().enumerate() {
            if i != primary && !summary.category.is_fact_like() {
                nodes.push(self.node(summary, NodeRole::Dimension));
            }
        }

        let links: Vec<NetworkLink> = (1..nodes.len())
            .map(|target| NetworkLink {
                source: Network::PRIMARY,
                target,
            })
            .collect();

        let rings = seed_positions(&mut nodes, viewport, &self.network, &self.force);

        let stats = NetworkStats {
            records: records.len(),
            tables: nodes.len(),
            excluded_tables: excluded.len(),
            secondary_facts: nodes.iter().filter(|n| n.role == NodeRole::SecondaryFact).count(),
            dimensions: nodes.iter().filter(|n| n.role == NodeRole::Dimension).count(),
            primary_selection: selection,
        };

        info!(
            subject_area,
            primary = %nodes[Network::PRIMARY].id,
            tables = stats.tables,
            secondary_facts = stats.secondary_facts,
            dimensions = stats.dimensions,
            excluded = stats.excluded_tables,
            "star network built"
        );

        NetworkBuild::Ready(Network {
            subject_area: subject_area.to_string(),
            nodes,
            links,
            rings,
            stats,
        })
    }

    fn node(&self, summary: &TableSummary, role: NodeRole) -> NetworkNode {
        let radius = match role {
            NodeRole::PrimaryFact => self.network.primary_radius,
            NodeRole::SecondaryFact => self.network.secondary_radius,
            NodeRole::Dimension => self.network.dimension_radius,
        };
        NetworkNode {
            id: summary.name.clone(),
            role,
            category: summary.category,
            radius,
            record_count: summary.records,
            column_count: summary.columns.len(),
            presentation_table_count: summary.presentation_tables.len(),
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            fx: None,
            fy: None,
        }
    }

    fn cleaned(&self, table: &str) -> CleanedTable {
        let prefixes = [self.inference.record_type_prefix.as_str(), "DW_"];
        clean_table_name(
            table,
            &prefixes,
            &self.inference.record_type_suffixes,
            &self.network.lines_marker,
        )
    }

    /// Index of the primary fact in `summaries` (sorted by name)
    fn select_primary(
        &self,
        summaries: &[TableSummary],
        subject_area: &str,
    ) -> (usize, PrimarySelection) {
        let key = subject_area_tokens(subject_area);

        // Best score; ties prefer the non-lines variant, then the name
        let best = summaries
            .iter()
            .enumerate()
            .filter(|(_, s)| s.category.is_fact_like())
            .filter_map(|(i, s)| {
                let cleaned = self.cleaned(&s.name);
                let score = match_score(&key, &cleaned);
                (score > 0).then_some((i, score, cleaned.is_lines))
            })
            .min_by(|a, b| {
                b.1.cmp(&a.1)
                    .then(a.2.cmp(&b.2))
                    .then_with(|| summaries[a.0].name.cmp(&summaries[b.0].name))
            });

        if let Some((i, score, _)) = best {
            debug!(table = %summaries[i].name, score, "primary fact matched by name");
            return (i, PrimarySelection::NameMatch { score });
        }

        if let Some(i) = summaries.iter().position(|s| s.category.is_fact_like()) {
            debug!(table = %summaries[i].name, "no name match, promoting first fact table");
            return (i, PrimarySelection::FirstSecondaryFact);
        }

        // Most distinct presentation tables, then most records, then name
        let hub = summaries
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                b.presentation_tables
                    .len()
                    .cmp(&a.presentation_tables.len())
                    .then(b.records.cmp(&a.records))
                    .then_with(|| a.name.cmp(&b.name))
            })
            .map_or(0, |(i, _)| i);
        debug!(table = %summaries[hub].name, "no fact table, promoting most-connected table");
        (hub, PrimarySelection::MostConnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{EnrichedLineageRecord, LineageRecord};
    use std::sync::Arc;

    fn rec(pt: &str, table: &str, col: &str) -> RecordRef {
        Arc::new(EnrichedLineageRecord::new(
            LineageRecord::new("Sales Orders", pt, col, table, col),
            InferenceRules::builtin().inferred_source(table, col),
        ))
    }

    fn build(records: &[RecordRef]) -> NetworkBuild {
        NetworkBuilder::default().build(records, "Sales Orders", Viewport::default())
    }

    #[test]
    fn test_empty_selection() {
        assert_eq!(
            build(&[]),
            NetworkBuild::Empty {
                subject_area: "Sales Orders".to_string()
            }
        );
    }

    #[test]
    fn test_only_excluded_tables_is_empty() {
        let records = vec![
            rec("Orders", "DW_NS_SALES_ORDER_AUX_F", "A"),
            rec("Orders", "SELECT 1 FROM DUAL", "B"),
        ];
        assert!(build(&records).is_empty());
    }

    #[test]
    fn test_exclusion_patterns() {
        let builder = NetworkBuilder::default();
        assert!(builder.is_excluded("DW_NS_ORDER_TMP"));
        assert!(builder.is_excluded("select x from y"));
        assert!(builder.is_excluded("NVL(DW_NS_ITEM_D.NAME)"));
        assert!(builder.is_excluded("   "));
        assert!(!builder.is_excluded("DW_NS_ITEM_D"));
    }

    #[test]
    fn test_single_fact_no_dimensions() {
        let records = vec![
            rec("Orders", "DW_NS_SALES_ORDER_F", "AMOUNT"),
            rec("Orders", "DW_NS_SALES_ORDER_F", "QTY"),
        ];
        let network = build(&records).into_network().unwrap();
        assert_eq!(network.nodes.len(), 1);
        assert!(network.links.is_empty());
        assert_eq!(network.primary().role, NodeRole::PrimaryFact);
        assert_eq!(network.primary().column_count, 2);
    }

    #[test]
    fn test_star_topology() {
        let records = vec![
            rec("Orders", "DW_NS_SALES_ORDER_F", "AMOUNT"),
            rec("Customer", "DW_NS_CUSTOMER_D", "NAME"),
            rec("Item", "DW_NS_ITEM_D", "NAME"),
            rec("Location", "DW_NS_LOCATION_D", "NAME"),
        ];
        let network = build(&records).into_network().unwrap();

        assert_eq!(network.count_of_role(NodeRole::Dimension), 3);
        assert_eq!(network.links.len(), 3);
        assert!(network.links.iter().all(|l| l.source == Network::PRIMARY));
        assert!(network
            .links
            .iter()
            .all(|l| network.nodes[l.target].role == NodeRole::Dimension));
    }

    #[test]
    fn test_lines_variant_loses_tie() {
        let records = vec![
            rec("Lines", "DW_NS_SALES_ORDER_LINES_F", "AMOUNT"),
            rec("Orders", "DW_NS_SALES_ORDER_F", "AMOUNT"),
            rec("Quota", "DW_NS_SALES_QUOTA_F", "AMOUNT"),
        ];
        let network = build(&records).into_network().unwrap();
        assert_eq!(network.primary().id, "DW_NS_SALES_ORDER_F");
        assert_eq!(network.count_of_role(NodeRole::SecondaryFact), 2);
        assert_eq!(
            network.stats.primary_selection,
            PrimarySelection::NameMatch { score: 100 }
        );
    }

    #[test]
    fn test_fallback_first_fact() {
        let records = vec![
            rec("Budget", "DW_NS_BUDGET_F", "AMOUNT"),
            rec("Account", "DW_NS_ACCOUNT_EF", "BALANCE"),
            rec("Customer", "DW_NS_CUSTOMER_D", "NAME"),
        ];
        let network = build(&records).into_network().unwrap();
        // Sorted by name: DW_NS_ACCOUNT_EF comes first
        assert_eq!(network.primary().id, "DW_NS_ACCOUNT_EF");
        assert_eq!(
            network.stats.primary_selection,
            PrimarySelection::FirstSecondaryFact
        );
    }

    #[test]
    fn test_fallback_most_connected() {
        let records = vec![
            rec("Customer", "DW_NS_CUSTOMER_D", "NAME"),
            rec("Item", "DW_NS_ITEM_D", "NAME"),
            rec("Orders", "DW_NS_ITEM_D", "SKU"),
        ];
        let network = build(&records).into_network().unwrap();
        assert_eq!(network.primary().id, "DW_NS_ITEM_D");
        assert_eq!(network.stats.primary_selection, PrimarySelection::MostConnected);
        assert_eq!(network.links.len(), 1);
    }

    #[test]
    fn test_radii_tiered_by_role() {
        let records = vec![
            rec("Orders", "DW_NS_SALES_ORDER_F", "AMOUNT"),
            rec("Quota", "DW_NS_SALES_QUOTA_F", "AMOUNT"),
            rec("Customer", "DW_NS_CUSTOMER_D", "NAME"),
        ];
        let network = build(&records).into_network().unwrap();
        let config = NetworkConfig::default();
        for node in &network.nodes {
            let expected = match node.role {
                NodeRole::PrimaryFact => config.primary_radius,
                NodeRole::SecondaryFact => config.secondary_radius,
                NodeRole::Dimension => config.dimension_radius,
            };
            assert_eq!(node.radius, expected);
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let network = NetworkConfig {
            primary_radius: 5.0,
            dimension_radius: 50.0,
            ..NetworkConfig::default()
        };
        assert!(NetworkBuilder::new(network, ForceConfig::default()).is_err());
        assert!(NetworkBuilder::new(
            NetworkConfig::default(),
            ForceConfig::default().initial_iterations(0)
        )
        .is_err());
    }
}
