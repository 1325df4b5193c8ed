//! Preset configurations
//!
//! Presets provide complete default configurations. They differ only in
//! spacing: how far apart the layout engines place nodes.

use serde::{Deserialize, Serialize};

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Small screens and embedded panels
    ///
    /// - Hierarchy: narrow rank gaps
    /// - Network: short links, tight rings
    Compact,

    /// Default desktop layout
    Balanced,

    /// Presentation mode, large monitors
    ///
    /// - Hierarchy: wide rank gaps
    /// - Network: long links, wide rings
    Spacious,
}

impl Preset {
    /// Multiplier applied to spacing constants
    pub fn spacing_factor(&self) -> f64 {
        match self {
            Self::Compact => 0.75,
            Self::Balanced => 1.0,
            Self::Spacious => 1.35,
        }
    }

    /// Parse preset from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "balanced" => Ok(Self::Balanced),
            "spacious" => Ok(Self::Spacious),
            _ => Err(format!(
                "Unknown preset '{}'. Valid presets: compact, balanced, spacious",
                s
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Balanced => "balanced",
            Self::Spacious => "spacious",
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Balanced
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
