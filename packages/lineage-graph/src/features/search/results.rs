//! Typed search results

use crate::shared::models::RecordRef;
use serde::Serialize;

/// Which record field matched. Declaration order is display priority:
/// column-level before table-level before subject-area-level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchResultKind {
    PresentationColumn,
    PhysicalColumn,
    PresentationTable,
    PhysicalTable,
    SubjectArea,
}

impl SearchResultKind {
    pub const ALL: [SearchResultKind; 5] = [
        SearchResultKind::PresentationColumn,
        SearchResultKind::PhysicalColumn,
        SearchResultKind::PresentationTable,
        SearchResultKind::PhysicalTable,
        SearchResultKind::SubjectArea,
    ];

    /// Lower sorts first
    pub fn priority(&self) -> u8 {
        *self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchResultKind::PresentationColumn => "presentation column",
            SearchResultKind::PhysicalColumn => "physical column",
            SearchResultKind::PresentationTable => "presentation table",
            SearchResultKind::PhysicalTable => "physical table",
            SearchResultKind::SubjectArea => "subject area",
        }
    }

    /// The field of `record` this kind refers to
    pub fn value_of<'r>(&self, record: &'r RecordRef) -> &'r str {
        match self {
            SearchResultKind::PresentationColumn => &record.presentation_column,
            SearchResultKind::PhysicalColumn => &record.physical_column,
            SearchResultKind::PresentationTable => &record.presentation_table,
            SearchResultKind::PhysicalTable => &record.physical_table,
            SearchResultKind::SubjectArea => &record.subject_area,
        }
    }
}

impl std::fmt::Display for SearchResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One match. `record` is the first record in which the value matched,
/// giving the rendering layer a navigation target.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub kind: SearchResultKind,
    pub value: String,
    pub record: RecordRef,
}

/// Partition results by kind. Groups come in order of first appearance and
/// keep the input order inside each group.
pub fn group_by_kind(results: &[SearchResult]) -> Vec<(SearchResultKind, Vec<&SearchResult>)> {
    let mut groups: Vec<(SearchResultKind, Vec<&SearchResult>)> = Vec::new();
    for result in results {
        match groups.iter_mut().find(|(kind, _)| *kind == result.kind) {
            Some((_, members)) => members.push(result),
            None => groups.push((result.kind, vec![result])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{EnrichedLineageRecord, InferredSource, LineageRecord};
    use std::sync::Arc;

    fn result(kind: SearchResultKind, value: &str) -> SearchResult {
        SearchResult {
            kind,
            value: value.to_string(),
            record: Arc::new(EnrichedLineageRecord::new(
                LineageRecord::new("SA", "PT", "PC", "DW_T", "C"),
                InferredSource::default(),
            )),
        }
    }

    #[test]
    fn test_priority_order() {
        let priorities: Vec<u8> = SearchResultKind::ALL.iter().map(|k| k.priority()).collect();
        assert_eq!(priorities, vec![0, 1, 2, 3, 4]);
        assert!(SearchResultKind::PhysicalColumn < SearchResultKind::PresentationTable);
    }

    #[test]
    fn test_group_by_kind_keeps_first_seen_order() {
        let results = vec![
            result(SearchResultKind::PhysicalColumn, "a"),
            result(SearchResultKind::SubjectArea, "b"),
            result(SearchResultKind::PhysicalColumn, "c"),
        ];
        let groups = group_by_kind(&results);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, SearchResultKind::PhysicalColumn);
        let values: Vec<&str> = groups[0].1.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["a", "c"]);
        assert_eq!(groups[1].1[0].value, "b");
    }

    #[test]
    fn test_group_empty() {
        assert!(group_by_kind(&[]).is_empty());
    }
}
