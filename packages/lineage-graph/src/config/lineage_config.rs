//! Top-level lineage configuration
//!
//! Aggregates every section config. Construction goes through a preset,
//! optional closure overrides, and `build()` which validates everything.

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, ConfigOverrides, SCHEMA_VERSION};
use super::preset::Preset;
use super::section_configs::*;
use super::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Complete configuration of the lineage core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageConfig {
    pub preset: Preset,
    pub ingest: IngestConfig,
    pub inference: InferenceConfig,
    pub hierarchy: HierarchyLayoutConfig,
    pub network: NetworkConfig,
    pub force: ForceConfig,
    pub zoom: ZoomConfig,
    pub search: SearchConfig,
}

impl LineageConfig {
    /// Start from a preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            ingest: IngestConfig::default(),
            inference: InferenceConfig::default(),
            hierarchy: HierarchyLayoutConfig::from_preset(preset),
            network: NetworkConfig::default(),
            force: ForceConfig::from_preset(preset),
            zoom: ZoomConfig::default(),
            search: SearchConfig::default(),
        }
    }

    /// Override the hierarchy section
    pub fn hierarchy(
        mut self,
        f: impl FnOnce(HierarchyLayoutConfig) -> HierarchyLayoutConfig,
    ) -> Self {
        self.hierarchy = f(self.hierarchy);
        self
    }

    /// Override the force section
    pub fn force(mut self, f: impl FnOnce(ForceConfig) -> ForceConfig) -> Self {
        self.force = f(self.force);
        self
    }

    /// Override the network section
    pub fn network(mut self, f: impl FnOnce(NetworkConfig) -> NetworkConfig) -> Self {
        self.network = f(self.network);
        self
    }

    /// Override the zoom section
    pub fn zoom(mut self, f: impl FnOnce(ZoomConfig) -> ZoomConfig) -> Self {
        self.zoom = f(self.zoom);
        self
    }

    /// Override the inference section
    pub fn inference(mut self, f: impl FnOnce(InferenceConfig) -> InferenceConfig) -> Self {
        self.inference = f(self.inference);
        self
    }

    /// Validate every section and return the config
    pub fn build(self) -> ConfigResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Load a YAML v1 file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "loading lineage config");
        Self::from_yaml_str(&content)
    }

    /// Parse a YAML v1 document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        // Version check
        match export.version {
            None => return Err(ConfigError::MissingVersion),
            Some(SCHEMA_VERSION) => {}
            Some(found) => {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: vec![SCHEMA_VERSION],
                })
            }
        }

        let preset = Preset::from_str(&export.preset)
            .map_err(|_| ConfigError::UnknownPreset(export.preset.clone()))?;

        let mut config = Self::preset(preset);
        if let Some(overrides) = export.overrides {
            config.apply_overrides(overrides);
        }

        config.build()
    }

    /// Serialize as a YAML v1 document carrying every section
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(SCHEMA_VERSION),
            preset: self.preset.to_string(),
            overrides: Some(ConfigOverrides {
                ingest: Some(self.ingest.clone()),
                inference: Some(self.inference.clone()),
                hierarchy: Some(self.hierarchy.clone()),
                network: Some(self.network.clone()),
                force: Some(self.force.clone()),
                zoom: Some(self.zoom.clone()),
                search: Some(self.search.clone()),
            }),
        };

        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(ingest) = overrides.ingest {
            self.ingest = ingest;
        }
        if let Some(inference) = overrides.inference {
            self.inference = inference;
        }
        if let Some(hierarchy) = overrides.hierarchy {
            self.hierarchy = hierarchy;
        }
        if let Some(network) = overrides.network {
            self.network = network;
        }
        if let Some(force) = overrides.force {
            self.force = force;
        }
        if let Some(zoom) = overrides.zoom {
            self.zoom = zoom;
        }
        if let Some(search) = overrides.search {
            self.search = search;
        }
    }
}

impl Validatable for LineageConfig {
    fn validate(&self) -> ConfigResult<()> {
        let sections: [&dyn Validatable; 7] = [
            &self.ingest,
            &self.inference,
            &self.hierarchy,
            &self.network,
            &self.force,
            &self.zoom,
            &self.search,
        ];
        for section in sections {
            section.validate()?;
            debug!(section = section.config_name(), "config section validated");
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "lineage"
    }
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}
