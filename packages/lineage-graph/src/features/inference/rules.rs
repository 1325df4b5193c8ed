//! Compiled inference rules
//!
//! `InferenceRules` is the compiled form of `InferenceConfig`: the record
//! type pattern is built once and reused for every record.

use super::naming::{infer_field_name, to_lower_camel};
use crate::config::{ConfigError, ConfigResult, InferenceConfig, SuffixRule, Validatable};
use crate::shared::models::{InferredSource, TableCategory};
use once_cell::sync::Lazy;
use regex::Regex;

static BUILTIN_RULES: Lazy<InferenceRules> = Lazy::new(|| {
    InferenceRules::new(&InferenceConfig::default()).expect("built-in inference rules compile")
});

/// Naming-convention rules, compiled
#[derive(Debug, Clone)]
pub struct InferenceRules {
    /// `^<prefix>(<type>+?)(?:<suffix>|...)?$`
    record_type_pattern: Regex,
    generated_markers: Vec<String>,
    suffix_rules: Vec<SuffixRule>,
}

impl InferenceRules {
    /// Compile rules from a validated config
    pub fn new(config: &InferenceConfig) -> ConfigResult<Self> {
        config.validate()?;

        let suffixes: Vec<String> = config
            .record_type_suffixes
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| regex::escape(s))
            .collect();

        let pattern = if suffixes.is_empty() {
            format!("^{}([A-Z0-9_]+?)$", regex::escape(&config.record_type_prefix))
        } else {
            format!(
                "^{}([A-Z0-9_]+?)(?:{})?$",
                regex::escape(&config.record_type_prefix),
                suffixes.join("|")
            )
        };

        let record_type_pattern = Regex::new(&pattern)
            .map_err(|e| ConfigError::invalid_pattern("record_type_suffixes", e))?;

        Ok(Self {
            record_type_pattern,
            generated_markers: config.generated_markers.clone(),
            suffix_rules: config.suffix_rules.clone(),
        })
    }

    /// Process-wide rules compiled from the default config
    pub fn builtin() -> &'static InferenceRules {
        &BUILTIN_RULES
    }

    /// Substring membership against the generated-table markers
    pub fn is_generated(&self, table: &str) -> bool {
        self.generated_markers
            .iter()
            .any(|marker| table.contains(marker.as_str()))
    }

    /// Record type of a replicated table; `None` for generated tables and
    /// names outside the replication convention
    pub fn infer_record_type(&self, table: &str) -> Option<String> {
        if self.is_generated(table) {
            return None;
        }

        let captures = self.record_type_pattern.captures(table)?;
        let token = captures.get(1)?.as_str();
        let camel = to_lower_camel(token);
        if camel.is_empty() {
            None
        } else {
            Some(camel)
        }
    }

    /// Compose record type and field name; generated tables get neither
    pub fn inferred_source(&self, table: &str, column: &str) -> InferredSource {
        if self.is_generated(table) {
            return InferredSource::generated();
        }
        InferredSource::sourced(self.infer_record_type(table), infer_field_name(column))
    }

    /// First matching suffix rule wins; `Unknown` otherwise
    pub fn classify(&self, table: &str) -> TableCategory {
        let upper = table.trim().to_uppercase();
        self.suffix_rules
            .iter()
            .find(|rule| upper.ends_with(rule.suffix.as_str()))
            .map(|rule| rule.category)
            .unwrap_or(TableCategory::Unknown)
    }
}

impl Default for InferenceRules {
    fn default() -> Self {
        BUILTIN_RULES.clone()
    }
}
