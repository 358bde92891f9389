//! Error types for the model delta system.
//!
//! This module provides the error hierarchy for every stage of a comparison
//! run: loading models, loading settings, and building the delta tree.
//!
//! Safety verdicts (`Unsafe`, `Fatal`) are not errors; they are regular
//! results of [`crate::delta::SafetyClassifier`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the model delta system.
#[derive(Debug, Error)]
pub enum ModelDeltaError {
    /// Model loading errors.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Delta construction errors.
    #[error("Delta error: {0}")]
    Delta(#[from] DeltaError),

    /// Settings errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading a configuration model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model file was not found.
    #[error("Model file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The model file could not be read or parsed.
    #[error("Failed to parse model: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// The document root is not a mapping.
    #[error("Model root must be a mapping, found {found}")]
    NotAMapping {
        /// Kind of value found at the root.
        found: String,
    },

    /// A value the model cannot represent.
    #[error("Unsupported value at '{path}': {reason}")]
    UnsupportedValue {
        /// Dotted path of the offending value.
        path: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Errors raised while reconstructing the delta tree.
///
/// These indicate a broken invariant between the walker and the builder
/// and are reported as defects, never recovered from.
#[derive(Debug, Error)]
pub enum DeltaError {
    /// A recorded path does not resolve in the current model.
    #[error("Delta path '{path}' does not resolve in the current model")]
    UnresolvedPath {
        /// The dotted path that failed to resolve.
        path: String,
    },

    /// A recorded path has no segments.
    #[error("Delta path is empty")]
    EmptyPath,
}

/// Settings-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file was not found.
    #[error("Settings file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The settings file could not be parsed.
    #[error("Failed to parse settings: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Settings validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },
}

/// Result type alias for model delta operations.
pub type Result<T> = std::result::Result<T, ModelDeltaError>;

impl ModelDeltaError {
    /// Returns true if this error signals a broken internal invariant
    /// rather than bad input.
    #[must_use]
    pub const fn is_defect(&self) -> bool {
        matches!(self, Self::Delta(_))
    }
}

impl ModelError {
    /// Creates a parse error with an optional source location.
    #[must_use]
    pub fn parse(message: impl Into<String>, location: Option<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location,
        }
    }

    /// Creates an unsupported value error.
    #[must_use]
    pub fn unsupported(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}
