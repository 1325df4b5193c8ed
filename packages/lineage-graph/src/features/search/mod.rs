//! Full-text search over lineage records
//!
//! # Architecture
//!
//! ```text
//! records ──▶ combined text ──▶ ForwardTokenizer ──▶ Tantivy (RAM)
//!                                                       │
//! query ──▶ words ──▶ TermQuery (Must) ─────────────────┘
//!                                                       │
//!                      candidates (limit × multiplier) ◀┘
//!                          │
//!                          ▼
//!           per-field substring check, (kind, value) dedup,
//!           stable sort by kind priority, truncate
//! ```

mod index;
mod results;
mod schema;
mod tokenizer;

pub use index::SearchIndex;
pub use results::{group_by_kind, SearchResult, SearchResultKind};
pub use schema::{SchemaFields, FIELD_CONTENT, FIELD_ORDINAL};
pub use tokenizer::{build_forward_analyzer, ForwardTokenizer, FORWARD_TOKENIZER};
