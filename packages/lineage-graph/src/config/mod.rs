//! Configuration System
//!
//! Every tunable constant of the core, with progressive disclosure:
//! - Level 1: Preset - one-liner
//! - Level 2: Section override via closures
//! - Level 3: YAML v1 document
//!
//! # Examples
//!
//! ```rust,ignore
//! use lineage_graph::config::{LineageConfig, Preset};
//!
//! // Level 1: preset
//! let config = LineageConfig::preset(Preset::Balanced).build()?;
//!
//! // Level 2: override one section
//! let config = LineageConfig::preset(Preset::Compact)
//!     .force(|f| f.charge_strength(-300.0).orbit_speed(0.0))
//!     .build()?;
//!
//! // Level 3: YAML
//! let config = LineageConfig::from_yaml("lineage.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod lineage_config;
pub mod preset;
pub mod section_configs;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigExportV1, ConfigOverrides, SCHEMA_VERSION};
pub use lineage_config::LineageConfig;
pub use preset::Preset;
pub use section_configs::{
    ForceConfig, HierarchyLayoutConfig, IngestConfig, InferenceConfig, NetworkConfig,
    SearchConfig, SuffixRule, ZoomConfig,
};
pub use validation::{Validatable, ValidatableCollection};
