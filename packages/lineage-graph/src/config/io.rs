//! Configuration I/O (YAML)
//!
//! Defines YAML schema types. Loading and export live in
//! `lineage_config.rs`.

use super::section_configs::*;
use serde::{Deserialize, Serialize};

/// Current (and only) schema version
pub const SCHEMA_VERSION: u32 = 1;

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    /// Base preset
    pub preset: String,

    /// Section overrides; a present section replaces the preset's section,
    /// fields missing inside it take the built-in defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

/// Configuration overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingest: Option<IngestConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference: Option<InferenceConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<HierarchyLayoutConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<ForceConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<ZoomConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchConfig>,
}
