//! Lineage record models
//!
//! A record is one presentation-to-physical field mapping. Records are
//! enriched once at load time and then shared by reference (`RecordRef`)
//! across every index, graph and search structure.

use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

/// Separator used by composite lookup keys (`subjectArea::presentationTable`)
pub const KEY_SEPARATOR: &str = "::";

/// One presentation column mapped onto one physical warehouse column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageRecord {
    pub subject_area: String,
    pub presentation_table: String,
    pub presentation_column: String,
    pub physical_table: String,
    pub physical_column: String,
}

impl LineageRecord {
    pub fn new(
        subject_area: impl Into<String>,
        presentation_table: impl Into<String>,
        presentation_column: impl Into<String>,
        physical_table: impl Into<String>,
        physical_column: impl Into<String>,
    ) -> Self {
        Self {
            subject_area: subject_area.into(),
            presentation_table: presentation_table.into(),
            presentation_column: presentation_column.into(),
            physical_table: physical_table.into(),
            physical_column: physical_column.into(),
        }
    }

    /// `subjectArea::presentationTable`
    pub fn presentation_table_key(&self) -> String {
        presentation_table_key(&self.subject_area, &self.presentation_table)
    }

    /// `subjectArea::presentationTable::presentationColumn`
    pub fn presentation_column_key(&self) -> String {
        presentation_column_key(
            &self.subject_area,
            &self.presentation_table,
            &self.presentation_column,
        )
    }
}

/// Build the composite key of a presentation table
pub fn presentation_table_key(subject_area: &str, presentation_table: &str) -> String {
    format!("{}{}{}", subject_area, KEY_SEPARATOR, presentation_table)
}

/// Build the composite key of a presentation column
pub fn presentation_column_key(
    subject_area: &str,
    presentation_table: &str,
    presentation_column: &str,
) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        subject_area,
        presentation_table,
        presentation_column,
        sep = KEY_SEPARATOR
    )
}

/// Best-effort guess of the upstream NetSuite record and field.
///
/// Invariant: a generated table has neither a record type nor a field name.
/// Fields are private so the only way to build a value is through
/// [`InferredSource::generated`] or [`InferredSource::sourced`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferredSource {
    record_type: Option<String>,
    field_name: Option<String>,
    is_nsaw_generated: bool,
}

impl InferredSource {
    /// Source of a warehouse-generated table: no upstream record exists
    pub fn generated() -> Self {
        Self {
            record_type: None,
            field_name: None,
            is_nsaw_generated: true,
        }
    }

    /// Source of a table replicated from an upstream record
    pub fn sourced(record_type: Option<String>, field_name: Option<String>) -> Self {
        Self {
            record_type,
            field_name,
            is_nsaw_generated: false,
        }
    }

    pub fn record_type(&self) -> Option<&str> {
        self.record_type.as_deref()
    }

    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }

    pub fn is_nsaw_generated(&self) -> bool {
        self.is_nsaw_generated
    }
}

/// Lineage record plus its inferred source. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedLineageRecord {
    #[serde(flatten)]
    pub record: LineageRecord,
    pub inferred: InferredSource,
}

impl EnrichedLineageRecord {
    pub fn new(record: LineageRecord, inferred: InferredSource) -> Self {
        Self { record, inferred }
    }
}

impl Deref for EnrichedLineageRecord {
    type Target = LineageRecord;

    fn deref(&self) -> &Self::Target {
        &self.record
    }
}

/// Shared handle to an enriched record
pub type RecordRef = Arc<EnrichedLineageRecord>;
