//! Value types for configuration models.
//!
//! A model is a tree of string-keyed mappings whose leaves are scalars or
//! sequences of scalars. Mappings are kept in a `BTreeMap` so that every
//! walk over a model visits keys in the same order.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::path::DottedPath;

/// A configuration tree: string keys mapped to values.
pub type ModelTree = BTreeMap<String, ModelValue>;

/// A single value inside a configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ModelValue {
    /// A scalar leaf.
    Scalar(Scalar),
    /// An ordered sequence of scalars. Treated as a leaf when diffing.
    Sequence(Vec<Scalar>),
    /// A nested tree.
    Node(ModelTree),
}

/// A scalar leaf value.
///
/// Floats compare by bit pattern, matching the fingerprint encoding, so a
/// `.nan` leaf equals itself.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(String),
}

impl ModelValue {
    /// Returns the nested tree if this value is a node.
    #[must_use]
    pub const fn as_node(&self) -> Option<&ModelTree> {
        match self {
            Self::Node(tree) => Some(tree),
            _ => None,
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl From<Scalar> for ModelValue {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<ModelTree> for ModelValue {
    fn from(tree: ModelTree) -> Self {
        Self::Node(tree)
    }
}

impl From<&str> for ModelValue {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<i64> for ModelValue {
    fn from(n: i64) -> Self {
        Self::Scalar(Scalar::Int(n))
    }
}

impl From<bool> for ModelValue {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            // Debug keeps the fractional part on whole numbers (1.0, not 1)
            Self::Float(x) => write!(f, "{x:?}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

/// Resolves a dotted path inside a tree.
///
/// Returns `None` when any segment is missing or when the path tries to
/// descend through a non-mapping value.
#[must_use]
pub fn lookup<'a>(tree: &'a ModelTree, path: &DottedPath) -> Option<&'a ModelValue> {
    let mut segments = path.segments();
    let mut value = tree.get(segments.next()?)?;
    for segment in segments {
        value = value.as_node()?.get(segment)?;
    }
    Some(value)
}

/// Iterates every leaf of a tree together with its dotted path.
///
/// Empty mappings count as leaves so that they are not lost.
#[must_use]
pub fn leaves(tree: &ModelTree) -> Vec<(DottedPath, &ModelValue)> {
    let mut out = Vec::new();
    for (key, value) in tree {
        collect_leaves(DottedPath::root(key), value, &mut out);
    }
    out
}

fn collect_leaves<'a>(
    path: DottedPath,
    value: &'a ModelValue,
    out: &mut Vec<(DottedPath, &'a ModelValue)>,
) {
    match value {
        ModelValue::Node(tree) if !tree.is_empty() => {
            for (key, child) in tree {
                collect_leaves(path.child(key), child, out);
            }
        }
        _ => out.push((path, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ModelTree {
        let mut pool = ModelTree::new();
        pool.insert("MaxCapacity".into(), ModelValue::from(15_i64));
        let mut resource = ModelTree::new();
        resource.insert("Pool".into(), ModelValue::Node(pool));
        resource.insert("Targets".into(), ModelValue::Sequence(vec![Scalar::String("c1".into())]));
        let mut tree = ModelTree::new();
        tree.insert("resources".into(), ModelValue::Node(resource));
        tree.insert("name".into(), ModelValue::from("base"));
        tree
    }

    #[test]
    fn test_lookup_nested_value() {
        let tree = sample();
        let path = DottedPath::from("resources.Pool.MaxCapacity");
        assert_eq!(lookup(&tree, &path), Some(&ModelValue::from(15_i64)));
    }

    #[test]
    fn test_lookup_missing_or_through_leaf() {
        let tree = sample();
        assert!(lookup(&tree, &DottedPath::from("resources.Missing")).is_none());
        assert!(lookup(&tree, &DottedPath::from("name.inner")).is_none());
    }

    #[test]
    fn test_leaves_cover_all_paths() {
        let tree = sample();
        let paths: Vec<String> = leaves(&tree).into_iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(
            paths,
            vec!["name", "resources.Pool.MaxCapacity", "resources.Targets"]
        );
    }

    #[test]
    fn test_float_display_keeps_fraction() {
        assert_eq!(Scalar::Float(1.0).to_string(), "1.0");
        assert_eq!(Scalar::Float(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_deep_equality() {
        assert_eq!(ModelValue::Node(sample()), ModelValue::Node(sample()));
        let mut other = sample();
        other.insert("name".into(), ModelValue::from("changed"));
        assert_ne!(ModelValue::Node(sample()), ModelValue::Node(other));
    }

    #[test]
    fn test_nan_equals_itself() {
        let nan = ModelValue::Scalar(Scalar::Float(f64::NAN));
        assert_eq!(nan, nan.clone());
        assert_ne!(Scalar::Float(1.0), Scalar::Int(1));
        assert_ne!(Scalar::Float(1.0), Scalar::Float(1.5));
    }
}
