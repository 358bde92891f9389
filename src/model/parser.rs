//! Model parser for loading configuration snapshots.
//!
//! Snapshots are YAML documents whose root is a mapping. JSON documents are
//! accepted as well since JSON is a subset of YAML.

use crate::error::{ModelDeltaError, ModelError, Result};
use serde_yaml::Value;
use std::path::Path;
use tracing::{debug, info};

use super::path::DottedPath;
use super::value::{ModelTree, ModelValue, Scalar};

/// Parser for configuration model snapshots.
#[derive(Debug, Default)]
pub struct ModelParser;

impl ModelParser {
    /// Creates a new model parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads a model from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ModelTree> {
        let path = path.as_ref();
        info!("Loading model from: {}", path.display());

        if !path.exists() {
            return Err(ModelDeltaError::Model(ModelError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ModelError::parse(
                format!("Failed to read file: {e}"),
                Some(path.display().to_string()),
            )
        })?;

        self.parse_str(&content, Some(path))
    }

    /// Parses a model from a YAML or JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is malformed, the root is not a mapping,
    /// or a value cannot be represented in a model.
    pub fn parse_str(&self, content: &str, source: Option<&Path>) -> Result<ModelTree> {
        debug!("Parsing model document");

        let document: Value = serde_yaml::from_str(content).map_err(|e| {
            ModelError::parse(
                format!("YAML parse error: {e}"),
                source.map(|p| p.display().to_string()),
            )
        })?;

        let tree = match strip_tags(document) {
            Value::Mapping(mapping) => convert_mapping(mapping, None)?,
            // An empty document is an empty model
            Value::Null => ModelTree::new(),
            other => {
                return Err(ModelDeltaError::Model(ModelError::NotAMapping {
                    found: yaml_kind(&other).to_string(),
                }));
            }
        };

        debug!("Parsed model with {} top-level sections", tree.len());
        Ok(tree)
    }
}

fn strip_tags(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => strip_tags(tagged.value),
        other => other,
    }
}

fn convert_mapping(
    mapping: serde_yaml::Mapping,
    parent: Option<&DottedPath>,
) -> std::result::Result<ModelTree, ModelError> {
    let mut tree = ModelTree::new();
    for (key, value) in mapping {
        let key = convert_key(strip_tags(key), parent)?;
        let path = parent.map_or_else(|| DottedPath::root(&key), |p| p.child(&key));
        let value = convert_value(strip_tags(value), &path)?;
        tree.insert(key, value);
    }
    Ok(tree)
}

fn convert_key(key: Value, parent: Option<&DottedPath>) -> std::result::Result<String, ModelError> {
    match key {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::from("null")),
        other => Err(ModelError::unsupported(
            parent.map_or_else(String::new, ToString::to_string),
            format!("mapping keys must be scalars, found {}", yaml_kind(&other)),
        )),
    }
}

fn convert_value(value: Value, path: &DottedPath) -> std::result::Result<ModelValue, ModelError> {
    match value {
        Value::Mapping(mapping) => Ok(ModelValue::Node(convert_mapping(mapping, Some(path))?)),
        Value::Sequence(items) => {
            let mut scalars = Vec::with_capacity(items.len());
            for item in items {
                match convert_scalar(strip_tags(item)) {
                    Ok(scalar) => scalars.push(scalar),
                    Err(found) => {
                        return Err(ModelError::unsupported(
                            path.to_string(),
                            format!("sequence items must be scalars, found {found}"),
                        ));
                    }
                }
            }
            Ok(ModelValue::Sequence(scalars))
        }
        other => convert_scalar(other).map(ModelValue::Scalar).map_err(|found| {
            ModelError::unsupported(path.to_string(), format!("unexpected {found}"))
        }),
    }
}

/// Converts a YAML scalar. On failure returns the kind of the rejected value.
fn convert_scalar(value: Value) -> std::result::Result<Scalar, &'static str> {
    match value {
        Value::Null => Ok(Scalar::Null),
        Value::Bool(b) => Ok(Scalar::Bool(b)),
        Value::Number(n) => n
            .as_i64()
            .map(Scalar::Int)
            .or_else(|| n.as_f64().map(Scalar::Float))
            .ok_or("number"),
        Value::String(s) => Ok(Scalar::String(s)),
        other => Err(yaml_kind(&other)),
    }
}

const fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
