//! Tantivy schema for lineage records
//!
//! 1. `content` - the five record fields joined (indexed with the forward
//!    tokenizer, not stored)
//! 2. `ordinal` - position of the record in the indexed slice (stored)

use super::tokenizer::FORWARD_TOKENIZER;
use tantivy::schema::{Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED};

pub const FIELD_CONTENT: &str = "content";
pub const FIELD_ORDINAL: &str = "ordinal";

/// Schema with its field handles
#[derive(Debug, Clone)]
pub struct SchemaFields {
    pub schema: Schema,
    pub content: Field,
    pub ordinal: Field,
}

impl SchemaFields {
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        let content_opts = TextOptions::default().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(FORWARD_TOKENIZER)
                .set_index_option(IndexRecordOption::Basic),
        );
        let content = builder.add_text_field(FIELD_CONTENT, content_opts);
        let ordinal = builder.add_u64_field(FIELD_ORDINAL, STORED);

        Self {
            schema: builder.build(),
            content,
            ordinal,
        }
    }
}

impl Default for SchemaFields {
    fn default() -> Self {
        Self::new()
    }
}
