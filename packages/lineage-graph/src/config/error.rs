//! Configuration error types

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Range validation error
    #[error("Invalid range for field '{field}': {value} not in {min}..={max}. {hint}")]
    Range {
        field: String,
        value: String,
        min: String,
        max: String,
        hint: String,
    },

    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// Unknown preset name
    #[error("Unknown preset '{0}'. Valid presets: compact, balanced, spacious")]
    UnknownPreset(String),

    /// A naming pattern could not be compiled
    #[error("Invalid pattern for '{field}': {reason}")]
    InvalidPattern { field: String, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create a range error with a hint
    pub fn range_with_hint(
        field: impl Into<String>,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
        hint: impl Into<String>,
    ) -> Self {
        Self::Range {
            field: field.into(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
            hint: hint.into(),
        }
    }

    /// Create a pattern error
    pub fn invalid_pattern(field: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}

/// Check `min <= value <= max` for a float field
pub(crate) fn check_range_f64(
    field: &str,
    value: f64,
    min: f64,
    max: f64,
    hint: &str,
) -> ConfigResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(ConfigError::range_with_hint(field, value, min, max, hint));
    }
    Ok(())
}

/// Check `min <= value <= max` for an integer field
pub(crate) fn check_range_usize(
    field: &str,
    value: usize,
    min: usize,
    max: usize,
    hint: &str,
) -> ConfigResult<()> {
    if value < min || value > max {
        return Err(ConfigError::range_with_hint(field, value, min, max, hint));
    }
    Ok(())
}
