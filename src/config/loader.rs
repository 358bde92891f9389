//! Settings loader with environment overrides.
//!
//! Settings are resolved in three steps: defaults, then the optional
//! settings file, then environment variables.

use crate::error::{ConfigError, ModelDeltaError, Result};
use std::path::Path;
use tracing::{debug, info, warn};

use super::settings::DiffSettings;

/// Environment variable enabling trace output.
pub const DEBUG_ENV_VAR: &str = "DEBUG_INTROSPECT_JOB";

/// Environment variable overriding the delta document path.
pub const OUTPUT_ENV_VAR: &str = "MODEL_DELTA_OUTPUT";

/// Environment variable overriding the addition depth.
pub const DEPTH_ENV_VAR: &str = "MODEL_DELTA_ADDITION_DEPTH";

/// Loader for [`DiffSettings`].
#[derive(Debug, Default)]
pub struct SettingsLoader;

impl SettingsLoader {
    /// Creates a new settings loader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves settings from an optional file and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is given but cannot be read or parsed.
    pub fn load(&self, path: Option<&Path>) -> Result<DiffSettings> {
        let mut settings = match path {
            Some(path) => self.load_file(path)?,
            None => DiffSettings::default(),
        };
        Self::apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
        Ok(settings)
    }

    /// Loads settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<DiffSettings> {
        let path = path.as_ref();
        info!("Loading settings from: {}", path.display());

        if !path.exists() {
            return Err(ModelDeltaError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ModelDeltaError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses settings from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or names unknown fields.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<DiffSettings> {
        debug!("Parsing YAML settings");

        if content.trim().is_empty() {
            return Ok(DiffSettings::default());
        }

        serde_yaml::from_str(content).map_err(|e| {
            ModelDeltaError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location: source.map(|p| p.display().to_string()),
            })
        })
    }

    /// Applies environment overrides read through `var`.
    ///
    /// Taking the lookup as a function keeps the process environment out of
    /// tests.
    pub fn apply_env_overrides(settings: &mut DiffSettings, var: impl Fn(&str) -> Option<String>) {
        if var(DEBUG_ENV_VAR).is_some() {
            debug!("Enabling debug output from environment");
            settings.debug = true;
        }

        if let Some(output) = var(OUTPUT_ENV_VAR) {
            debug!("Overriding delta_output from environment");
            settings.delta_output = output.into();
        }

        if let Some(depth) = var(DEPTH_ENV_VAR) {
            match depth.trim().parse() {
                Ok(depth) => {
                    debug!("Overriding addition_depth from environment");
                    settings.addition_depth = depth;
                }
                Err(e) => warn!("Ignoring {DEPTH_ENV_VAR}={depth}: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{DEFAULT_ADDITION_DEPTH, DEFAULT_DELTA_OUTPUT};
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = SettingsLoader::new().parse_yaml("", None).expect("empty settings");
        assert_eq!(settings, DiffSettings::default());
        assert_eq!(settings.deployment_section, "appDeployments");
        assert_eq!(settings.topology_section, "topology");
        assert_eq!(settings.addition_depth, DEFAULT_ADDITION_DEPTH);
        assert_eq!(settings.delta_output, PathBuf::from(DEFAULT_DELTA_OUTPUT));
        assert!(!settings.debug);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = SettingsLoader::new()
            .parse_yaml("addition_depth: 4\ndelta_output: /var/run/delta.json\n", None)
            .expect("parse");
        assert_eq!(settings.addition_depth, 4);
        assert_eq!(settings.delta_output, PathBuf::from("/var/run/delta.json"));
        assert_eq!(settings.topology_section, "topology");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SettingsLoader::new().parse_yaml("depth: 4\n", None).unwrap_err();
        assert!(matches!(err, ModelDeltaError::Config(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = DiffSettings::default();
        SettingsLoader::apply_env_overrides(
            &mut settings,
            env(&[
                (DEBUG_ENV_VAR, ""),
                (OUTPUT_ENV_VAR, "/tmp/other.json"),
                (DEPTH_ENV_VAR, "5"),
            ]),
        );
        assert!(settings.debug);
        assert_eq!(settings.delta_output, PathBuf::from("/tmp/other.json"));
        assert_eq!(settings.addition_depth, 5);
    }

    #[test]
    fn test_invalid_depth_override_ignored() {
        let mut settings = DiffSettings::default();
        SettingsLoader::apply_env_overrides(&mut settings, env(&[(DEPTH_ENV_VAR, "deep")]));
        assert_eq!(settings.addition_depth, DEFAULT_ADDITION_DEPTH);
        assert!(!settings.debug);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "topology_section: shape").expect("write");
        let settings = SettingsLoader::new().load_file(file.path()).expect("load");
        assert_eq!(settings.topology_section, "shape");
    }

    #[test]
    fn test_load_missing_file() {
        let err = SettingsLoader::new().load_file("/nonexistent/settings.yaml").unwrap_err();
        assert!(matches!(err, ModelDeltaError::Config(ConfigError::FileNotFound { .. })));
    }
}
