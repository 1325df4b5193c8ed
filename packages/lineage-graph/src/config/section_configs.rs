//! Section-specific configuration types
//!
//! Each engine has its own configuration struct with validation. Every
//! constant that tunes layout, physics, zoom, inference or search lives
//! here so it can be changed from YAML without touching code.

use super::error::{check_range_f64, check_range_usize, ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::{Validatable, ValidatableCollection};
use crate::shared::models::TableCategory;
use serde::{Deserialize, Serialize};

// ============================================================================
// Ingest Configuration
// ============================================================================

/// Row admission rules applied before records reach the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestConfig {
    /// Physical tables must start with this prefix; anything else (inline
    /// SQL, opaque expressions) is not a warehouse table
    pub warehouse_prefix: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            warehouse_prefix: "DW_".to_string(),
        }
    }
}

impl Validatable for IngestConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.warehouse_prefix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "warehouse_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "ingest"
    }
}

// ============================================================================
// Inference Configuration
// ============================================================================

/// One `suffix → category` classification rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixRule {
    pub suffix: String,
    pub category: TableCategory,
}

impl SuffixRule {
    pub fn new(suffix: impl Into<String>, category: TableCategory) -> Self {
        Self {
            suffix: suffix.into(),
            category,
        }
    }
}

impl Validatable for SuffixRule {
    fn validate(&self) -> ConfigResult<()> {
        if self.suffix.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "suffix rule for {} must have a non-empty suffix",
                self.category
            )));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "suffix_rule"
    }
}

/// Naming-convention rules used to infer upstream sources and table roles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InferenceConfig {
    /// Prefix of tables replicated from NetSuite records
    pub record_type_prefix: String,

    /// Role suffixes stripped before the record type is derived
    pub record_type_suffixes: Vec<String>,

    /// Substrings marking warehouse-generated tables
    pub generated_markers: Vec<String>,

    /// Ordered classification rules, first match wins
    pub suffix_rules: Vec<SuffixRule>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            record_type_prefix: "DW_NS_".to_string(),
            record_type_suffixes: [
                "_CF_DH", "_CF_D", "_CF_F", "_CF", "_EF", "_DH", "_SEC", "_TL", "_PF", "_D", "_F",
                "_G",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            generated_markers: [
                "_DAY_D",
                "_DAY_",
                "CALENDAR",
                "FISCAL_CAL",
                "DUMMY",
                "_PRED_",
                "PREDICTION",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            // Most specific suffixes first: `_CF_D` must win over `_D`
            suffix_rules: vec![
                SuffixRule::new("_CF_DH", TableCategory::Hierarchy),
                SuffixRule::new("_CF_D", TableCategory::Calculated),
                SuffixRule::new("_CF_F", TableCategory::Calculated),
                SuffixRule::new("_CF", TableCategory::Calculated),
                SuffixRule::new("_DH", TableCategory::Hierarchy),
                SuffixRule::new("_EF", TableCategory::Enhanced),
                SuffixRule::new("_PF", TableCategory::Prediction),
                SuffixRule::new("_SEC", TableCategory::Security),
                SuffixRule::new("_G", TableCategory::Global),
                SuffixRule::new("_D", TableCategory::Dimension),
                SuffixRule::new("_F", TableCategory::Fact),
            ],
        }
    }
}

impl Validatable for InferenceConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.record_type_prefix.is_empty() {
            return Err(ConfigError::Validation(
                "record_type_prefix must not be empty".to_string(),
            ));
        }

        if self.generated_markers.iter().any(|m| m.is_empty()) {
            return Err(ConfigError::Validation(
                "generated_markers must not contain empty strings (would mark every table)"
                    .to_string(),
            ));
        }

        self.suffix_rules.validate_all()?;

        // A rule is dead if an earlier rule's suffix is also a suffix of it
        for (i, later) in self.suffix_rules.iter().enumerate() {
            if let Some(earlier) = self.suffix_rules[..i]
                .iter()
                .find(|earlier| later.suffix.ends_with(earlier.suffix.as_str()))
            {
                return Err(ConfigError::Validation(format!(
                    "suffix rule '{}' is shadowed by earlier rule '{}'; list more specific suffixes first",
                    later.suffix, earlier.suffix
                )));
            }
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "inference"
    }
}

// ============================================================================
// Hierarchical Layout Configuration
// ============================================================================

/// Layered (left-to-right) layout spacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HierarchyLayoutConfig {
    /// Node box width (px)
    pub node_width: f64,

    /// Node box height (px)
    pub node_height: f64,

    /// Horizontal gap between ranks (px)
    pub rank_sep: f64,

    /// Vertical gap between nodes of one rank (px)
    pub node_sep: f64,

    pub margin_x: f64,
    pub margin_y: f64,

    /// Barycenter sweeps for crossing reduction (0..=32)
    pub crossing_sweeps: usize,
}

impl HierarchyLayoutConfig {
    pub fn from_preset(preset: Preset) -> Self {
        let f = preset.spacing_factor();
        Self {
            rank_sep: 120.0 * f,
            node_sep: 24.0 * f,
            ..Self::default()
        }
    }

    /// Builder: Set rank separation
    pub fn rank_sep(mut self, v: f64) -> Self {
        self.rank_sep = v;
        self
    }

    /// Builder: Set node separation
    pub fn node_sep(mut self, v: f64) -> Self {
        self.node_sep = v;
        self
    }
}

impl Default for HierarchyLayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 220.0,
            node_height: 56.0,
            rank_sep: 120.0,
            node_sep: 24.0,
            margin_x: 20.0,
            margin_y: 20.0,
            crossing_sweeps: 4,
        }
    }
}

impl Validatable for HierarchyLayoutConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_range_f64("node_width", self.node_width, 1.0, 2000.0, "Nodes need a visible box")?;
        check_range_f64("node_height", self.node_height, 1.0, 2000.0, "Nodes need a visible box")?;
        check_range_f64("rank_sep", self.rank_sep, 0.0, 5000.0, "Rank gap must be non-negative")?;
        check_range_f64("node_sep", self.node_sep, 0.0, 5000.0, "Node gap must be non-negative")?;
        check_range_f64("margin_x", self.margin_x, 0.0, 5000.0, "")?;
        check_range_f64("margin_y", self.margin_y, 0.0, 5000.0, "")?;
        check_range_usize(
            "crossing_sweeps",
            self.crossing_sweeps,
            0,
            32,
            "More sweeps rarely improve ordering",
        )
    }

    fn config_name(&self) -> &'static str {
        "hierarchy"
    }
}

// ============================================================================
// Network Configuration
// ============================================================================

/// Star-network construction: table filtering, node sizes, seeding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Substrings marking auxiliary tables left out of the network
    pub excluded_table_markers: Vec<String>,

    /// Suffix of line-level fact tables (loses primary-fact ties)
    pub lines_marker: String,

    pub primary_radius: f64,
    pub secondary_radius: f64,
    pub dimension_radius: f64,

    /// Max seed offset added to ring positions (px)
    pub seed_jitter: f64,

    /// RNG seed for jitter; equal seeds give equal layouts
    pub seed: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            excluded_table_markers: ["_AUX", "_TMP", "_STG", "_BKP"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            lines_marker: "_LINES".to_string(),
            primary_radius: 42.0,
            secondary_radius: 28.0,
            dimension_radius: 16.0,
            seed_jitter: 6.0,
            seed: 0x5eed_1ea6,
        }
    }
}

impl Validatable for NetworkConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_range_f64("primary_radius", self.primary_radius, 1.0, 500.0, "")?;
        check_range_f64("secondary_radius", self.secondary_radius, 1.0, 500.0, "")?;
        check_range_f64("dimension_radius", self.dimension_radius, 1.0, 500.0, "")?;
        if !(self.primary_radius >= self.secondary_radius
            && self.secondary_radius >= self.dimension_radius)
        {
            return Err(ConfigError::Validation(
                "radii must be tiered: primary >= secondary >= dimension".to_string(),
            ));
        }
        check_range_f64("seed_jitter", self.seed_jitter, 0.0, 100.0, "Jitter only breaks symmetry")?;
        if self.excluded_table_markers.iter().any(|m| m.is_empty()) {
            return Err(ConfigError::Validation(
                "excluded_table_markers must not contain empty strings".to_string(),
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "network"
    }
}

// ============================================================================
// Force Simulation Configuration
// ============================================================================

/// Physics parameters of the force simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForceConfig {
    /// Synchronous ticks before the first render (1..=5000)
    pub initial_iterations: usize,

    pub alpha_start: f64,

    /// Convergence threshold
    pub alpha_min: f64,

    /// Fraction of the gap to `alpha_target` closed every tick
    pub alpha_decay: f64,

    /// Fraction of velocity lost every tick
    pub velocity_decay: f64,

    /// Alpha target once converged; keeps the orbit force alive
    pub sustain_alpha_target: f64,

    /// Alpha target while a node is dragged
    pub drag_alpha_target: f64,

    /// Multiplier on charge and link strength while dragging
    pub drag_relax_factor: f64,

    /// Rest length of links to secondary facts
    pub link_distance: f64,

    /// Dimension links are `link_distance * dimension_link_scale` long
    pub dimension_link_scale: f64,

    pub link_strength: f64,

    /// Negative = repulsion
    pub charge_strength: f64,
    pub charge_distance_min: f64,

    /// Pairs further apart than this ignore each other
    pub charge_distance_max: f64,

    /// Extra gap on top of both radii
    pub collision_padding: f64,
    pub collision_strength: f64,

    pub center_strength: f64,

    /// Target ring radius of secondary facts (before viewport scaling)
    pub radial_secondary_distance: f64,

    /// Target ring radius of dimensions (before viewport scaling)
    pub radial_dimension_distance: f64,
    pub radial_strength: f64,

    /// Tangential pull per tick, relative to orbit radius
    pub orbit_speed: f64,

    /// Speed cap (px per tick)
    pub max_velocity: f64,
}

impl ForceConfig {
    pub fn from_preset(preset: Preset) -> Self {
        let f = preset.spacing_factor();
        let base = Self::default();
        Self {
            link_distance: base.link_distance * f,
            radial_secondary_distance: base.radial_secondary_distance * f,
            radial_dimension_distance: base.radial_dimension_distance * f,
            collision_padding: base.collision_padding * f,
            ..base
        }
    }

    /// Builder: Set initial_iterations
    pub fn initial_iterations(mut self, v: usize) -> Self {
        self.initial_iterations = v;
        self
    }

    /// Builder: Set charge_strength
    pub fn charge_strength(mut self, v: f64) -> Self {
        self.charge_strength = v;
        self
    }

    /// Builder: Set orbit_speed
    pub fn orbit_speed(mut self, v: f64) -> Self {
        self.orbit_speed = v;
        self
    }
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            initial_iterations: 300,
            alpha_start: 1.0,
            alpha_min: 0.001,
            // 1 - alpha_min^(1/300): reaches alpha_min in ~300 ticks
            alpha_decay: 0.0228,
            velocity_decay: 0.4,
            sustain_alpha_target: 0.02,
            drag_alpha_target: 0.3,
            drag_relax_factor: 0.35,
            link_distance: 170.0,
            dimension_link_scale: 1.6,
            link_strength: 0.3,
            charge_strength: -420.0,
            charge_distance_min: 1.0,
            charge_distance_max: 600.0,
            collision_padding: 14.0,
            collision_strength: 0.9,
            center_strength: 0.02,
            radial_secondary_distance: 170.0,
            radial_dimension_distance: 300.0,
            radial_strength: 0.35,
            orbit_speed: 0.0015,
            max_velocity: 40.0,
        }
    }
}

impl Validatable for ForceConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_range_usize(
            "initial_iterations",
            self.initial_iterations,
            1,
            5000,
            "The synchronous warm-up must be bounded",
        )?;
        check_range_f64("alpha_start", self.alpha_start, 0.0, 1.0, "")?;
        check_range_f64("alpha_min", self.alpha_min, 1e-6, 0.5, "")?;
        check_range_f64(
            "alpha_decay",
            self.alpha_decay,
            1e-4,
            0.5,
            "Alpha must shrink every tick",
        )?;
        check_range_f64("velocity_decay", self.velocity_decay, 0.0, 1.0, "")?;
        check_range_f64("sustain_alpha_target", self.sustain_alpha_target, 0.0, 1.0, "")?;
        check_range_f64("drag_alpha_target", self.drag_alpha_target, 0.0, 1.0, "")?;
        check_range_f64("drag_relax_factor", self.drag_relax_factor, 0.0, 1.0, "")?;
        check_range_f64("link_distance", self.link_distance, 1.0, 5000.0, "")?;
        check_range_f64("dimension_link_scale", self.dimension_link_scale, 0.1, 10.0, "")?;
        check_range_f64("link_strength", self.link_strength, 0.0, 2.0, "")?;
        check_range_f64(
            "charge_strength",
            self.charge_strength,
            -10_000.0,
            0.0,
            "Charge is repulsive; use a negative value",
        )?;
        check_range_f64("charge_distance_min", self.charge_distance_min, 0.01, 1000.0, "")?;
        check_range_f64("charge_distance_max", self.charge_distance_max, 1.0, 100_000.0, "")?;
        if self.charge_distance_max <= self.charge_distance_min {
            return Err(ConfigError::Validation(
                "charge_distance_max must exceed charge_distance_min".to_string(),
            ));
        }
        check_range_f64("collision_padding", self.collision_padding, 0.0, 500.0, "")?;
        check_range_f64("collision_strength", self.collision_strength, 0.0, 1.0, "")?;
        check_range_f64("center_strength", self.center_strength, 0.0, 1.0, "")?;
        check_range_f64("radial_secondary_distance", self.radial_secondary_distance, 0.0, 5000.0, "")?;
        check_range_f64("radial_dimension_distance", self.radial_dimension_distance, 0.0, 5000.0, "")?;
        check_range_f64("radial_strength", self.radial_strength, 0.0, 1.0, "")?;
        check_range_f64("orbit_speed", self.orbit_speed, 0.0, 0.1, "")?;
        check_range_f64("max_velocity", self.max_velocity, 0.1, 10_000.0, "")?;

        if self.sustain_alpha_target < self.alpha_min && self.orbit_speed > 0.0 {
            tracing::warn!(
                sustain = self.sustain_alpha_target,
                alpha_min = self.alpha_min,
                "sustain_alpha_target below alpha_min; converged layouts will barely move"
            );
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "force"
    }
}

// ============================================================================
// Zoom / Viewport Configuration
// ============================================================================

/// Zoom bounds, wheel sensitivity and fit-to-viewport label estimates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoomConfig {
    pub min_scale: f64,
    pub max_scale: f64,

    /// Fit never zooms in past this scale
    pub max_fit_scale: f64,

    /// Padding around the fitted bounding box (px)
    pub fit_padding: f64,

    /// Scale factor per wheel delta unit: `scale *= 2^(-delta * sensitivity)`
    pub wheel_sensitivity: f64,

    /// Estimated label glyph width (px per char)
    pub label_char_width: f64,
    pub label_line_height: f64,

    /// Gap between a node's edge and its label
    pub label_gap: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 4.0,
            max_fit_scale: 1.0,
            fit_padding: 40.0,
            wheel_sensitivity: 0.002,
            label_char_width: 6.5,
            label_line_height: 14.0,
            label_gap: 6.0,
        }
    }
}

impl Validatable for ZoomConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_range_f64("min_scale", self.min_scale, 0.001, 1.0, "")?;
        check_range_f64("max_scale", self.max_scale, 1.0, 100.0, "")?;
        check_range_f64(
            "max_fit_scale",
            self.max_fit_scale,
            self.min_scale,
            1.0,
            "Fitting never zooms in past 100%",
        )?;
        check_range_f64("fit_padding", self.fit_padding, 0.0, 1000.0, "")?;
        check_range_f64("wheel_sensitivity", self.wheel_sensitivity, 0.0, 1.0, "")?;
        check_range_f64("label_char_width", self.label_char_width, 0.0, 100.0, "")?;
        check_range_f64("label_line_height", self.label_line_height, 0.0, 200.0, "")?;
        check_range_f64("label_gap", self.label_gap, 0.0, 200.0, "")
    }

    fn config_name(&self) -> &'static str {
        "zoom"
    }
}

// ============================================================================
// Search Configuration
// ============================================================================

/// Full-text search tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Candidates scanned = `limit * candidate_multiplier`
    pub candidate_multiplier: usize,

    /// Tantivy writer heap (bytes, single indexing thread)
    pub writer_memory_bytes: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            candidate_multiplier: 3,
            writer_memory_bytes: 20_000_000,
        }
    }
}

impl Validatable for SearchConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_range_usize("candidate_multiplier", self.candidate_multiplier, 1, 100, "")?;
        // Tantivy rejects writer heaps below 15MB per thread
        check_range_usize(
            "writer_memory_bytes",
            self.writer_memory_bytes,
            15_000_000,
            1_000_000_000,
            "Writer heap must be at least 15MB",
        )
    }

    fn config_name(&self) -> &'static str {
        "search"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(IngestConfig::default().validate().is_ok());
        assert!(InferenceConfig::default().validate().is_ok());
        assert!(HierarchyLayoutConfig::default().validate().is_ok());
        assert!(NetworkConfig::default().validate().is_ok());
        assert!(ForceConfig::default().validate().is_ok());
        assert!(ZoomConfig::default().validate().is_ok());
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_validate() {
        for preset in [Preset::Compact, Preset::Balanced, Preset::Spacious] {
            assert!(HierarchyLayoutConfig::from_preset(preset).validate().is_ok());
            assert!(ForceConfig::from_preset(preset).validate().is_ok());
        }
    }

    #[test]
    fn test_shadowed_suffix_rule_rejected() {
        let mut config = InferenceConfig::default();
        config.suffix_rules.insert(0, SuffixRule::new("_D", TableCategory::Dimension));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("shadowed"));
    }

    #[test]
    fn test_empty_generated_marker_rejected() {
        let mut config = InferenceConfig::default();
        config.generated_markers.push(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_force_charge_must_repel() {
        let config = ForceConfig::default().charge_strength(50.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_force_iterations_bounded() {
        assert!(ForceConfig::default().initial_iterations(0).validate().is_err());
        assert!(ForceConfig::default().initial_iterations(10_000).validate().is_err());
    }

    #[test]
    fn test_zoom_fit_never_exceeds_100_percent() {
        let config = ZoomConfig {
            max_fit_scale: 1.5,
            ..ZoomConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_untiered_radii_rejected() {
        let config = NetworkConfig {
            dimension_radius: 60.0,
            ..NetworkConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_search_writer_minimum() {
        let config = SearchConfig {
            writer_memory_bytes: 1_000,
            ..SearchConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
