//! Configuration validation
//!
//! Every config section implements `Validatable`; `LineageConfig::build`
//! validates all sections before handing out a config.

use super::error::ConfigResult;

/// Trait for validatable configuration objects
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for log messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

/// Extension trait for validating lists of configs (e.g. suffix rules)
pub trait ValidatableCollection {
    /// Validate every element, stopping at the first error
    fn validate_all(&self) -> ConfigResult<()>;
}

impl<T: Validatable> ValidatableCollection for Vec<T> {
    fn validate_all(&self) -> ConfigResult<()> {
        for config in self {
            config.validate()?;
        }
        Ok(())
    }
}
