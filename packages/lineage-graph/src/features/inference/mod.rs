//! Lineage Inference
//!
//! Pure functions deriving semantic metadata from warehouse naming
//! conventions:
//!
//! - `DW_NS_CUSTOMER_D` → record type `customer`, category Dimension
//! - `ACCOUNT_NUMBER`   → field name `accountNumber`
//! - `DW_NS_DAY_D`      → generated (no upstream record)
//!
//! The free functions use the built-in rules. Callers with custom
//! `InferenceConfig` build their own [`InferenceRules`].

mod naming;
mod rules;

pub use naming::to_lower_camel;
pub use rules::InferenceRules;

use crate::shared::models::{InferredSource, TableCategory};

/// True if the table was synthesized by the warehouse itself
pub fn is_generated(table: &str) -> bool {
    InferenceRules::builtin().is_generated(table)
}

/// Upstream record type encoded in a replicated table name
pub fn infer_record_type(table: &str) -> Option<String> {
    InferenceRules::builtin().infer_record_type(table)
}

/// Upstream field name of a physical column
pub fn infer_field_name(column: &str) -> Option<String> {
    naming::infer_field_name(column)
}

/// Inferred source of one physical column
pub fn inferred_source(table: &str, column: &str) -> InferredSource {
    InferenceRules::builtin().inferred_source(table, column)
}

/// Category of a physical table by its role suffix
pub fn classify_physical_table(table: &str) -> TableCategory {
    InferenceRules::builtin().classify(table)
}
