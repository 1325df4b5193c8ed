//! Row normalization and enrichment

use super::raw_row::RawLineageRow;
use crate::config::IngestConfig;
use crate::errors::Result;
use crate::features::inference::InferenceRules;
use crate::shared::models::{EnrichedLineageRecord, LineageRecord, RecordRef};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of loading a batch of rows
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub records: Vec<RecordRef>,

    /// Rows missing subject area, presentation table or presentation column
    pub dropped_incomplete: usize,

    /// Rows whose physical side is not a warehouse table (inline SQL etc.)
    pub dropped_non_warehouse: usize,
}

impl LoadReport {
    pub fn dropped(&self) -> usize {
        self.dropped_incomplete + self.dropped_non_warehouse
    }
}

enum RowOutcome {
    Accepted(LineageRecord),
    Incomplete,
    NonWarehouse,
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn admit(row: &RawLineageRow, config: &IngestConfig) -> RowOutcome {
    let subject_area = trimmed(&row.subject_area);
    let presentation_table = trimmed(&row.presentation_table);
    let presentation_column = trimmed(&row.presentation_column);

    if subject_area.is_empty() || presentation_table.is_empty() || presentation_column.is_empty()
    {
        return RowOutcome::Incomplete;
    }

    let physical_table = trimmed(&row.physical_table);
    let physical_column = trimmed(&row.physical_column);

    if !physical_table.starts_with(config.warehouse_prefix.as_str()) || physical_column.is_empty()
    {
        return RowOutcome::NonWarehouse;
    }

    RowOutcome::Accepted(LineageRecord {
        subject_area,
        presentation_table,
        presentation_column,
        physical_table,
        physical_column,
    })
}

/// Trim a raw row and check admission; `None` if the row is dropped
pub fn normalize_row(row: &RawLineageRow, config: &IngestConfig) -> Option<LineageRecord> {
    match admit(row, config) {
        RowOutcome::Accepted(record) => Some(record),
        RowOutcome::Incomplete | RowOutcome::NonWarehouse => None,
    }
}

/// Attach the inferred upstream source
pub fn enrich(record: LineageRecord, rules: &InferenceRules) -> EnrichedLineageRecord {
    let inferred = rules.inferred_source(&record.physical_table, &record.physical_column);
    EnrichedLineageRecord::new(record, inferred)
}

/// Normalize, filter and enrich a batch of rows
pub fn load_records<I>(rows: I, config: &IngestConfig, rules: &InferenceRules) -> LoadReport
where
    I: IntoIterator<Item = RawLineageRow>,
{
    let mut report = LoadReport::default();

    for (row_index, row) in rows.into_iter().enumerate() {
        match admit(&row, config) {
            RowOutcome::Accepted(record) => {
                report.records.push(Arc::new(enrich(record, rules)));
            }
            RowOutcome::Incomplete => {
                debug!(row_index, "dropping incomplete lineage row");
                report.dropped_incomplete += 1;
            }
            RowOutcome::NonWarehouse => {
                debug!(
                    row_index,
                    physical_table = row.physical_table.as_deref().unwrap_or(""),
                    "dropping non-warehouse lineage row"
                );
                report.dropped_non_warehouse += 1;
            }
        }
    }

    info!(
        records = report.records.len(),
        dropped_incomplete = report.dropped_incomplete,
        dropped_non_warehouse = report.dropped_non_warehouse,
        "lineage rows loaded"
    );

    report
}

/// Load from a JSON array of row objects keyed by the export's headers
pub fn load_records_from_json(
    json: &str,
    config: &IngestConfig,
    rules: &InferenceRules,
) -> Result<LoadReport> {
    let rows: Vec<RawLineageRow> = serde_json::from_str(json)?;
    Ok(load_records(rows, config, rules))
}
