//! Lineage Explorer - facade consumed by the rendering layer
//!
//! # Architecture
//!
//! ```text
//! rows ──▶ load_records ──▶ Vec<RecordRef> ─┬─▶ LineageIndex ─┬─▶ HierarchyTransformer ─▶ LineageGraph
//!                                           │                 └─▶ SimulationController ─▶ positions + view
//!                                           └─▶ SearchIndex ───────▶ SearchResult
//! ```
//!
//! The explorer owns every piece of state: the record store, both indexes
//! and the single live simulation. Loading a new dataset replaces all of
//! them and stops the simulation.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use lineage_graph::{LineageConfig, LineageExplorer, RawLineageRow, Viewport};
//! use lineage_graph::shared::models::ChromeInsets;
//!
//! let mut explorer = LineageExplorer::from_rows(rows, LineageConfig::default())?;
//!
//! let graph = explorer.presentation_table_graph("Sales", "Orders", true);
//! let ticket = explorer.start_network("Sales", Viewport::default(), ChromeInsets::none())?;
//! while let Some(nodes) = explorer.network_mut().on_frame(ticket) {
//!     draw(nodes);
//! }
//! ```

use crate::config::{LineageConfig, Validatable};
use crate::errors::{LineageError, Result};
use crate::features::hierarchy::{HierarchyTransformer, LineageGraph};
use crate::features::inference::InferenceRules;
use crate::features::ingest::{load_records, RawLineageRow};
use crate::features::lineage_index::LineageIndex;
use crate::features::network::{NetworkBuilder, SimulationController, SimulationTicket};
use crate::features::search::{SearchIndex, SearchResult};
use crate::shared::models::{ChromeInsets, RecordRef, Viewport};
use serde::Serialize;
use tracing::info;

/// Row counts of the last load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSummary {
    pub records: usize,
    pub dropped_incomplete: usize,
    pub dropped_non_warehouse: usize,
}

#[derive(Debug)]
pub struct LineageExplorer {
    config: LineageConfig,
    rules: InferenceRules,
    index: LineageIndex,
    search: SearchIndex,
    transformer: HierarchyTransformer,
    network: SimulationController,
    summary: LoadSummary,
}

impl LineageExplorer {
    /// Empty explorer; call [`load_rows`](Self::load_rows) to fill it
    pub fn new(config: LineageConfig) -> Result<Self> {
        config.validate()?;
        let rules = InferenceRules::new(&config.inference)?;

        let transformer = HierarchyTransformer::with_rules(config.hierarchy.clone(), rules.clone());
        let builder = NetworkBuilder::new(config.network.clone(), config.force.clone())?
            .with_inference(config.inference.clone(), rules.clone());
        let network = SimulationController::new(builder, config.zoom.clone())?;
        let search = SearchIndex::build(&[], &config.search)?;

        Ok(Self {
            config,
            rules,
            index: LineageIndex::default(),
            search,
            transformer,
            network,
            summary: LoadSummary::default(),
        })
    }

    pub fn from_rows<I>(rows: I, config: LineageConfig) -> Result<Self>
    where
        I: IntoIterator<Item = RawLineageRow>,
    {
        let mut explorer = Self::new(config)?;
        explorer.load_rows(rows)?;
        Ok(explorer)
    }

    /// Rows as a JSON array of objects keyed by the export's column headers
    pub fn from_json(json: &str, config: LineageConfig) -> Result<Self> {
        let rows: Vec<RawLineageRow> = serde_json::from_str(json)?;
        Self::from_rows(rows, config)
    }

    /// Replace the dataset. Stops any running simulation.
    pub fn load_rows<I>(&mut self, rows: I) -> Result<LoadSummary>
    where
        I: IntoIterator<Item = RawLineageRow>,
    {
        let report = load_records(rows, &self.config.ingest, &self.rules);

        self.search.rebuild(&report.records)?;
        self.index = LineageIndex::build_with_rules(&report.records, &self.rules);
        self.network.stop();

        self.summary = LoadSummary {
            records: report.records.len(),
            dropped_incomplete: report.dropped_incomplete,
            dropped_non_warehouse: report.dropped_non_warehouse,
        };
        let stats = self.index.stats();
        info!(
            records = self.summary.records,
            dropped = report.dropped(),
            subject_areas = stats.subject_areas,
            physical_tables = stats.physical_tables,
            "dataset loaded"
        );
        Ok(self.summary)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Hierarchical graphs
    // ═══════════════════════════════════════════════════════════════════

    /// Lineage of every column of one presentation table
    pub fn presentation_table_graph(
        &self,
        subject_area: &str,
        presentation_table: &str,
        include_physical_columns: bool,
    ) -> LineageGraph {
        let records = self
            .index
            .records_for_presentation_table(subject_area, presentation_table);
        self.transformer.transform(records, include_physical_columns)
    }

    /// Lineage of a single presentation column
    pub fn presentation_column_graph(
        &self,
        subject_area: &str,
        presentation_table: &str,
        presentation_column: &str,
        include_physical_columns: bool,
    ) -> LineageGraph {
        let records = self.index.records_for_presentation_column(
            subject_area,
            presentation_table,
            presentation_column,
        );
        self.transformer.transform(records, include_physical_columns)
    }

    /// Everything that reads from one physical table
    pub fn physical_table_graph(
        &self,
        physical_table: &str,
        include_physical_columns: bool,
    ) -> LineageGraph {
        let records = self.index.records_for_physical_table(physical_table);
        self.transformer.transform(records, include_physical_columns)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Star network
    // ═══════════════════════════════════════════════════════════════════

    /// Stop the running simulation and start one for `subject_area`.
    /// An unknown subject area yields the explicit empty state.
    pub fn start_network(
        &mut self,
        subject_area: &str,
        viewport: Viewport,
        insets: ChromeInsets,
    ) -> Result<SimulationTicket> {
        if !viewport.is_valid() {
            return Err(LineageError::invalid_input(format!(
                "viewport must be positive and finite, got {}x{}",
                viewport.width, viewport.height
            )));
        }
        let records = self.index.records_for_subject_area(subject_area);
        Ok(self.network.start(records, subject_area, viewport, insets))
    }

    pub fn network(&self) -> &SimulationController {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut SimulationController {
        &mut self.network
    }

    // ═══════════════════════════════════════════════════════════════════
    // Search and read access
    // ═══════════════════════════════════════════════════════════════════

    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        self.search.search(query, limit)
    }

    pub fn index(&self) -> &LineageIndex {
        &self.index
    }

    pub fn records(&self) -> &[RecordRef] {
        self.index.records()
    }

    pub fn config(&self) -> &LineageConfig {
        &self.config
    }

    pub fn load_summary(&self) -> LoadSummary {
        self.summary
    }
}
