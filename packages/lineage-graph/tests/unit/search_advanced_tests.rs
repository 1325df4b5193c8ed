//! Search behaviour over realistic record sets: typing, dedup, ordering,
//! limits and grouping

use lineage_graph::config::{IngestConfig, SearchConfig};
use lineage_graph::features::inference::InferenceRules;
use lineage_graph::{
    group_by_kind, load_records, RawLineageRow, RecordRef, SearchIndex, SearchResultKind,
};
use std::collections::HashSet;

fn records(rows: &[(&str, &str, &str, &str, &str)]) -> Vec<RecordRef> {
    let rows = rows
        .iter()
        .map(|(sa, pt, pc, t, c)| RawLineageRow::new(sa, pt, pc, t, c));
    load_records(rows, &IngestConfig::default(), InferenceRules::builtin()).records
}

fn finance() -> Vec<RecordRef> {
    records(&[
        ("Finance", "Payments", "Amount", "DW_NS_PAYMENT_F", "AMOUNT"),
        ("Finance", "Payments", "Bank Account", "DW_NS_PAYMENT_F", "ACCOUNTNUMBER"),
        ("Finance", "Accounts", "Account Name", "DW_NS_ACCOUNT_D", "NAME"),
        ("Finance", "Accounts", "Account Type", "DW_NS_ACCOUNT_D", "ACCOUNT_TYPE"),
        ("Finance", "Accounts", "Account Name", "DW_NS_ACCOUNT_D", "FULL_NAME"),
        ("Accounting Periods", "Periods", "Period", "DW_NS_PERIOD_D", "NAME"),
    ])
}

fn index(records: &[RecordRef]) -> SearchIndex {
    SearchIndex::build(records, &SearchConfig::default()).unwrap()
}

#[test]
fn test_account_prefix_hits_physical_column() {
    let records = finance();
    let results = index(&records).search("account", 50).unwrap();

    assert!(results
        .iter()
        .any(|r| r.kind == SearchResultKind::PhysicalColumn && r.value == "ACCOUNTNUMBER"));
}

#[test]
fn test_results_deduplicated() {
    let records = finance();
    let results = index(&records).search("account", 50).unwrap();

    let mut seen = HashSet::new();
    for r in &results {
        assert!(seen.insert((r.kind, r.value.clone())), "duplicate {:?}", r);
    }

    // "Account Name" appears on two records, reported once
    let names = results
        .iter()
        .filter(|r| r.kind == SearchResultKind::PresentationColumn && r.value == "Account Name")
        .count();
    assert_eq!(names, 1);
}

#[test]
fn test_column_before_table_before_subject_area() {
    let records = finance();
    let results = index(&records).search("account", 50).unwrap();

    let priorities: Vec<u8> = results.iter().map(|r| r.kind.priority()).collect();
    let mut sorted = priorities.clone();
    sorted.sort();
    assert_eq!(priorities, sorted);

    assert_eq!(results.first().map(|r| r.kind), Some(SearchResultKind::PresentationColumn));
    assert_eq!(results.last().map(|r| r.kind), Some(SearchResultKind::SubjectArea));
    assert_eq!(results.last().map(|r| r.value.as_str()), Some("Accounting Periods"));
}

#[test]
fn test_limit_truncates_after_sorting() {
    let records = finance();
    let results = index(&records).search("account", 2).unwrap();

    assert_eq!(results.len(), 2);
    assert!(results
        .iter()
        .all(|r| r.kind == SearchResultKind::PresentationColumn));
}

#[test]
fn test_case_insensitive_and_multiword() {
    let records = finance();
    let idx = index(&records);

    let upper = idx.search("BANK", 10).unwrap();
    assert_eq!(upper.len(), 1);
    assert_eq!(upper[0].value, "Bank Account");

    let phrase = idx.search("bank acc", 10).unwrap();
    assert_eq!(phrase.len(), 1);

    // Both words must occur in the record
    assert!(idx.search("bank period", 10).unwrap().is_empty());
}

#[test]
fn test_result_points_at_matching_record() {
    let records = finance();
    let results = index(&records).search("period", 10).unwrap();
    let subject = results
        .iter()
        .find(|r| r.kind == SearchResultKind::SubjectArea)
        .unwrap();
    assert_eq!(subject.value, "Accounting Periods");

    let table = results
        .iter()
        .find(|r| r.kind == SearchResultKind::PhysicalTable)
        .unwrap();
    assert_eq!(table.value, "DW_NS_PERIOD_D");
    assert_eq!(table.record.presentation_table, "Periods");
}

#[test]
fn test_grouping() {
    let records = finance();
    let results = index(&records).search("account", 50).unwrap();
    let groups = group_by_kind(&results);

    let kinds: Vec<SearchResultKind> = groups.iter().map(|(k, _)| *k).collect();
    let mut sorted = kinds.clone();
    sorted.sort();
    assert_eq!(kinds, sorted);
    assert_eq!(
        groups.iter().map(|(_, g)| g.len()).sum::<usize>(),
        results.len()
    );
}
