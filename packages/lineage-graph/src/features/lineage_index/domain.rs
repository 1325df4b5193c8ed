//! Index aggregates

use crate::shared::models::TableCategory;
use serde::Serialize;

/// One subject area and the presentation tables it exposes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectAreaInfo {
    pub name: String,
    /// Sorted, distinct
    pub presentation_tables: Vec<String>,
    pub record_count: usize,
}

/// One presentation table within a subject area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationTableInfo {
    pub name: String,
    pub subject_area: String,
    /// Sorted, distinct
    pub columns: Vec<String>,
    /// Sorted, distinct
    pub physical_tables: Vec<String>,
    pub record_count: usize,
}

/// One physical warehouse table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalTableInfo {
    pub name: String,
    /// Sorted, distinct
    pub columns: Vec<String>,
    /// Sorted `subjectArea::presentationTable` keys referencing this table
    pub presentation_tables: Vec<String>,
    pub record_type: Option<String>,
    pub is_nsaw_generated: bool,
    pub category: TableCategory,
}

/// Summary counts of a built index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub records: usize,
    pub subject_areas: usize,
    pub presentation_tables: usize,
    pub physical_tables: usize,
}
