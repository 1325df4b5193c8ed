//! LineageIndex construction and queries

use super::domain::{IndexStats, PhysicalTableInfo, PresentationTableInfo, SubjectAreaInfo};
use crate::features::inference::InferenceRules;
use crate::shared::models::{presentation_column_key, presentation_table_key, RecordRef};
use ahash::AHashMap;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

// Accumulators filled during the single pass; BTree* keeps them sorted
#[derive(Default)]
struct SubjectAreaAcc {
    tables: BTreeSet<String>,
    count: usize,
}

#[derive(Default)]
struct PresentationTableAcc {
    columns: BTreeSet<String>,
    physical_tables: BTreeSet<String>,
    count: usize,
}

struct PhysicalTableAcc {
    columns: BTreeSet<String>,
    presentation_tables: BTreeSet<String>,
    record_type: Option<String>,
    is_nsaw_generated: bool,
}

/// Read-only lookup structure over every loaded record
#[derive(Debug, Clone, Default)]
pub struct LineageIndex {
    records: Vec<RecordRef>,

    subject_areas: Vec<SubjectAreaInfo>,
    presentation_tables: AHashMap<String, PresentationTableInfo>,
    physical_tables: BTreeMap<String, PhysicalTableInfo>,

    by_subject_area: AHashMap<String, Vec<RecordRef>>,
    by_presentation_table: AHashMap<String, Vec<RecordRef>>,
    by_physical_table: AHashMap<String, Vec<RecordRef>>,
    by_presentation_column: AHashMap<String, Vec<RecordRef>>,
}

impl LineageIndex {
    /// Build with the built-in classification rules
    pub fn build(records: &[RecordRef]) -> Self {
        Self::build_with_rules(records, InferenceRules::builtin())
    }

    pub fn build_with_rules(records: &[RecordRef], rules: &InferenceRules) -> Self {
        let mut index = Self {
            records: records.to_vec(),
            ..Self::default()
        };

        let mut sa_acc: BTreeMap<String, SubjectAreaAcc> = BTreeMap::new();
        let mut pt_acc: BTreeMap<(String, String), PresentationTableAcc> = BTreeMap::new();
        let mut phys_acc: BTreeMap<String, PhysicalTableAcc> = BTreeMap::new();

        // Single pass: lookup maps + aggregates
        for record in records {
            let pt_key = record.presentation_table_key();

            index
                .by_subject_area
                .entry(record.subject_area.clone())
                .or_default()
                .push(record.clone());
            index
                .by_presentation_table
                .entry(pt_key.clone())
                .or_default()
                .push(record.clone());
            index
                .by_physical_table
                .entry(record.physical_table.clone())
                .or_default()
                .push(record.clone());
            index
                .by_presentation_column
                .entry(record.presentation_column_key())
                .or_default()
                .push(record.clone());

            let sa = sa_acc.entry(record.subject_area.clone()).or_default();
            sa.tables.insert(record.presentation_table.clone());
            sa.count += 1;

            let pt = pt_acc
                .entry((
                    record.subject_area.clone(),
                    record.presentation_table.clone(),
                ))
                .or_default();
            pt.columns.insert(record.presentation_column.clone());
            pt.physical_tables.insert(record.physical_table.clone());
            pt.count += 1;

            let phys = phys_acc
                .entry(record.physical_table.clone())
                .or_insert_with(|| PhysicalTableAcc {
                    columns: BTreeSet::new(),
                    presentation_tables: BTreeSet::new(),
                    record_type: record.inferred.record_type().map(str::to_string),
                    is_nsaw_generated: record.inferred.is_nsaw_generated(),
                });
            phys.columns.insert(record.physical_column.clone());
            phys.presentation_tables.insert(pt_key);
        }

        // Materialize sorted aggregates
        index.subject_areas = sa_acc
            .into_iter()
            .map(|(name, acc)| SubjectAreaInfo {
                name,
                presentation_tables: acc.tables.into_iter().collect(),
                record_count: acc.count,
            })
            .collect();

        index.presentation_tables = pt_acc
            .into_iter()
            .map(|((subject_area, name), acc)| {
                let key = presentation_table_key(&subject_area, &name);
                let info = PresentationTableInfo {
                    name,
                    subject_area,
                    columns: acc.columns.into_iter().collect(),
                    physical_tables: acc.physical_tables.into_iter().collect(),
                    record_count: acc.count,
                };
                (key, info)
            })
            .collect();

        index.physical_tables = phys_acc
            .into_iter()
            .map(|(name, acc)| {
                let category = rules.classify(&name);
                let info = PhysicalTableInfo {
                    name: name.clone(),
                    columns: acc.columns.into_iter().collect(),
                    presentation_tables: acc.presentation_tables.into_iter().collect(),
                    record_type: acc.record_type,
                    is_nsaw_generated: acc.is_nsaw_generated,
                    category,
                };
                (name, info)
            })
            .collect();

        let stats = index.stats();
        info!(
            records = stats.records,
            subject_areas = stats.subject_areas,
            presentation_tables = stats.presentation_tables,
            physical_tables = stats.physical_tables,
            "lineage index built"
        );

        index
    }

    // ═══════════════════════════════════════════════════════════════════
    // Record queries (empty slice on miss)
    // ═══════════════════════════════════════════════════════════════════

    pub fn records_for_subject_area(&self, subject_area: &str) -> &[RecordRef] {
        self.by_subject_area
            .get(subject_area)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn records_for_presentation_table(
        &self,
        subject_area: &str,
        presentation_table: &str,
    ) -> &[RecordRef] {
        self.by_presentation_table
            .get(&presentation_table_key(subject_area, presentation_table))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn records_for_physical_table(&self, physical_table: &str) -> &[RecordRef] {
        self.by_physical_table
            .get(physical_table)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn records_for_presentation_column(
        &self,
        subject_area: &str,
        presentation_table: &str,
        presentation_column: &str,
    ) -> &[RecordRef] {
        self.by_presentation_column
            .get(&presentation_column_key(
                subject_area,
                presentation_table,
                presentation_column,
            ))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // ═══════════════════════════════════════════════════════════════════
    // Aggregates
    // ═══════════════════════════════════════════════════════════════════

    /// Sorted by name
    pub fn subject_areas(&self) -> &[SubjectAreaInfo] {
        &self.subject_areas
    }

    pub fn subject_area(&self, name: &str) -> Option<&SubjectAreaInfo> {
        self.subject_areas
            .binary_search_by(|info| info.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.subject_areas[i])
    }

    /// Presentation tables of a subject area, sorted by name
    pub fn presentation_tables(&self, subject_area: &str) -> Vec<&PresentationTableInfo> {
        self.subject_area(subject_area)
            .map(|sa| {
                sa.presentation_tables
                    .iter()
                    .filter_map(|table| self.presentation_table(subject_area, table))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn presentation_table(
        &self,
        subject_area: &str,
        presentation_table: &str,
    ) -> Option<&PresentationTableInfo> {
        self.presentation_tables
            .get(&presentation_table_key(subject_area, presentation_table))
    }

    pub fn physical_table(&self, name: &str) -> Option<&PhysicalTableInfo> {
        self.physical_tables.get(name)
    }

    /// All physical tables, sorted by name
    pub fn physical_tables(&self) -> impl Iterator<Item = &PhysicalTableInfo> {
        self.physical_tables.values()
    }

    pub fn records(&self) -> &[RecordRef] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            records: self.records.len(),
            subject_areas: self.subject_areas.len(),
            presentation_tables: self.presentation_tables.len(),
            physical_tables: self.physical_tables.len(),
        }
    }

    /// Records summed over the buckets of each lookup map: subject area,
    /// presentation table, physical table, presentation column
    pub fn bucket_totals(&self) -> [usize; 4] {
        let total = |map: &AHashMap<String, Vec<RecordRef>>| -> usize {
            map.values().map(Vec::len).sum()
        };
        [
            total(&self.by_subject_area),
            total(&self.by_presentation_table),
            total(&self.by_physical_table),
            total(&self.by_presentation_column),
        ]
    }
}
