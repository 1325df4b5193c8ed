//! In-RAM search index over lineage records
//!
//! Candidate retrieval is a Tantivy prefix match over one combined
//! document per record; result typing is a per-field substring check on
//! the candidates. The index is owned by the caller and rebuilt whole.

use super::results::{SearchResult, SearchResultKind};
use super::schema::SchemaFields;
use super::tokenizer::{build_forward_analyzer, words, FORWARD_TOKENIZER};
use crate::config::{SearchConfig, Validatable};
use crate::errors::Result;
use crate::shared::models::RecordRef;
use ahash::AHashSet;
use std::cmp::Ordering;
use std::time::Instant;
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, Query, TermQuery};
use tantivy::schema::{IndexRecordOption, Value};
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};
use tracing::{debug, info};

pub struct SearchIndex {
    index: Index,
    reader: IndexReader,
    fields: SchemaFields,
    records: Vec<RecordRef>,
    config: SearchConfig,
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex")
            .field("records", &self.records.len())
            .field("config", &self.config)
            .finish()
    }
}

impl SearchIndex {
    /// Index `records`; result ordinals refer to positions in this slice
    pub fn build(records: &[RecordRef], config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        let start = Instant::now();
        let fields = SchemaFields::new();

        let index = Index::create_in_ram(fields.schema.clone());
        index
            .tokenizers()
            .register(FORWARD_TOKENIZER, build_forward_analyzer());

        let mut writer: IndexWriter<TantivyDocument> =
            index.writer_with_num_threads(1, config.writer_memory_bytes)?;
        for (ordinal, record) in records.iter().enumerate() {
            writer.add_document(doc!(
                fields.content => combined_text(record),
                fields.ordinal => ordinal as u64,
            ))?;
        }
        writer.commit()?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        info!(
            records = records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search index built"
        );

        Ok(Self {
            index,
            reader,
            fields,
            records: records.to_vec(),
            config: config.clone(),
        })
    }

    /// Replace the indexed records. On error the previous state is kept.
    pub fn rebuild(&mut self, records: &[RecordRef]) -> Result<()> {
        *self = Self::build(records, &self.config)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Typed matches for `query`, column-level first, at most `limit`.
    ///
    /// Every query word must prefix-match a word of the record; each of the
    /// five fields of a candidate is then checked for the whole query as a
    /// case-insensitive substring. A (kind, value) pair is reported once.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit == 0 || self.records.is_empty() {
            return Ok(Vec::new());
        }

        let Some(tantivy_query) = self.candidate_query(&needle) else {
            return Ok(Vec::new());
        };

        // Never more candidates than documents
        let candidates = limit
            .saturating_mul(self.config.candidate_multiplier)
            .min(self.records.len());
        let searcher = self.reader.searcher();
        let top_docs = searcher.search(&tantivy_query, &TopDocs::with_limit(candidates))?;

        let mut hits: Vec<(f32, usize)> = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher.doc(address)?;
            if let Some(ordinal) = doc.get_first(self.fields.ordinal).and_then(|v| v.as_u64()) {
                hits.push((score, ordinal as usize));
            }
        }
        // Equal scores keep record order
        hits.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal).then(a.1.cmp(&b.1)));

        let mut seen: AHashSet<(SearchResultKind, &str)> = AHashSet::new();
        let mut results = Vec::new();
        for record in hits.iter().filter_map(|(_, ordinal)| self.records.get(*ordinal)) {
            for kind in SearchResultKind::ALL {
                let value = kind.value_of(record);
                if value.to_lowercase().contains(&needle) && seen.insert((kind, value)) {
                    results.push(SearchResult {
                        kind,
                        value: value.to_string(),
                        record: record.clone(),
                    });
                }
            }
        }

        let matched = results.len();
        results.sort_by_key(|r| r.kind.priority());
        results.truncate(limit);

        debug!(
            query,
            candidates = hits.len(),
            matched,
            returned = results.len(),
            "search"
        );
        Ok(results)
    }

    /// Conjunction of one term per query word
    fn candidate_query(&self, needle: &str) -> Option<BooleanQuery> {
        let clauses: Vec<(Occur, Box<dyn Query>)> = words(needle)
            .map(|(_, word)| {
                let term = Term::from_field_text(self.fields.content, word);
                let query: Box<dyn Query> =
                    Box::new(TermQuery::new(term, IndexRecordOption::Basic));
                (Occur::Must, query)
            })
            .collect();

        (!clauses.is_empty()).then(|| BooleanQuery::new(clauses))
    }

    /// Underlying Tantivy index
    pub fn index(&self) -> &Index {
        &self.index
    }
}

fn combined_text(record: &RecordRef) -> String {
    SearchResultKind::ALL
        .iter()
        .map(|kind| kind.value_of(record))
        .collect::<Vec<_>>()
        .join(" ")
}
