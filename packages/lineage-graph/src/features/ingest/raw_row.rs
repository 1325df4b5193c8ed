//! Raw source row, keyed by the export's column headers

use serde::{Deserialize, Serialize};

/// One row as produced by the upstream CSV/JSON parser.
///
/// Every field is optional; values may carry surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLineageRow {
    #[serde(rename = "Subject Area", default)]
    pub subject_area: Option<String>,

    #[serde(rename = "Presentation Table", default)]
    pub presentation_table: Option<String>,

    #[serde(rename = "Presentation Column", default)]
    pub presentation_column: Option<String>,

    #[serde(rename = "Physical Table", default)]
    pub physical_table: Option<String>,

    #[serde(rename = "Physical Column", default)]
    pub physical_column: Option<String>,
}

impl RawLineageRow {
    pub fn new(
        subject_area: &str,
        presentation_table: &str,
        presentation_column: &str,
        physical_table: &str,
        physical_column: &str,
    ) -> Self {
        Self {
            subject_area: Some(subject_area.to_string()),
            presentation_table: Some(presentation_table.to_string()),
            presentation_column: Some(presentation_column.to_string()),
            physical_table: Some(physical_table.to_string()),
            physical_column: Some(physical_column.to_string()),
        }
    }
}
