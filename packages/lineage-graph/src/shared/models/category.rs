//! Physical table categories
//!
//! Warehouse tables encode their role in a trailing suffix (`_D`, `_F`,
//! `_DH`, ...). The mapping from suffix to category lives in
//! `InferenceConfig::suffix_rules`; this module only defines the closed set
//! of categories.

use serde::{Deserialize, Serialize};

/// Category of a physical warehouse table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableCategory {
    Dimension,
    Fact,
    Hierarchy,
    Global,
    Calculated,
    Enhanced,
    Prediction,
    Security,
    Unknown,
}

impl TableCategory {
    /// Every category, in declaration order
    pub const ALL: [TableCategory; 9] = [
        TableCategory::Dimension,
        TableCategory::Fact,
        TableCategory::Hierarchy,
        TableCategory::Global,
        TableCategory::Calculated,
        TableCategory::Enhanced,
        TableCategory::Prediction,
        TableCategory::Security,
        TableCategory::Unknown,
    ];

    /// Fact and enhanced-fact tables carry measures and act as star centers
    pub fn is_fact_like(&self) -> bool {
        matches!(self, TableCategory::Fact | TableCategory::Enhanced)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dimension => "dimension",
            Self::Fact => "fact",
            Self::Hierarchy => "hierarchy",
            Self::Global => "global",
            Self::Calculated => "calculated",
            Self::Enhanced => "enhanced",
            Self::Prediction => "prediction",
            Self::Security => "security",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TableCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
