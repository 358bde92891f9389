//! Settings validation.

use crate::error::{ConfigError, ModelDeltaError, Result};
use crate::model::SEPARATOR;
use tracing::debug;

use super::settings::DiffSettings;

/// Validator for [`DiffSettings`].
#[derive(Debug, Default)]
pub struct SettingsValidator;

impl SettingsValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates settings.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn validate(&self, settings: &DiffSettings) -> Result<()> {
        Self::validate_section("deployment_section", &settings.deployment_section)?;
        Self::validate_section("topology_section", &settings.topology_section)?;

        if settings.deployment_section == settings.topology_section {
            return Err(ModelDeltaError::Config(ConfigError::validation(
                "deployment and topology sections must differ",
                "topology_section",
            )));
        }

        if settings.addition_depth == 0 {
            return Err(ModelDeltaError::Config(ConfigError::validation(
                "addition_depth must be at least 1",
                "addition_depth",
            )));
        }

        if settings.delta_output.as_os_str().is_empty() {
            return Err(ModelDeltaError::Config(ConfigError::validation(
                "delta_output cannot be empty",
                "delta_output",
            )));
        }

        debug!("Settings validation passed");
        Ok(())
    }

    fn validate_section(field: &str, section: &str) -> Result<()> {
        if section.is_empty() {
            return Err(ModelDeltaError::Config(ConfigError::validation(
                format!("{field} cannot be empty"),
                field,
            )));
        }
        // Sections are matched against the first segment of a dotted path
        if section.contains(SEPARATOR) {
            return Err(ModelDeltaError::Config(ConfigError::validation(
                format!("{field} '{section}' must be a single key"),
                field,
            )));
        }
        Ok(())
    }
}
