//! Model fingerprints for change detection.
//!
//! A fingerprint is a SHA-256 digest over a canonical, type-tagged encoding
//! of a model. It does not depend on the key order or formatting of the
//! source document, so two snapshots with equal content always share it.

use sha2::{Digest, Sha256};

use super::value::{ModelTree, ModelValue, Scalar};

/// Hasher for computing model fingerprints.
#[derive(Debug, Default)]
pub struct ModelHasher;

impl ModelHasher {
    /// Creates a new model hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes the fingerprint of a whole model.
    #[must_use]
    pub fn fingerprint(&self, tree: &ModelTree) -> String {
        let mut hasher = Sha256::new();
        hash_tree(&mut hasher, tree);
        hex::encode(hasher.finalize())
    }

    /// Computes the fingerprint of a single value.
    #[must_use]
    pub fn fingerprint_value(&self, value: &ModelValue) -> String {
        let mut hasher = Sha256::new();
        hash_value(&mut hasher, value);
        hex::encode(hasher.finalize())
    }

    /// Computes a short hash (first 8 characters) for display purposes.
    #[must_use]
    pub fn short_hash(&self, hash: &str) -> String {
        hash.chars().take(8).collect()
    }
}

// Each item is tagged and length-prefixed so that distinct trees never
// produce the same byte stream.
fn hash_tree(hasher: &mut Sha256, tree: &ModelTree) {
    hasher.update(b"{");
    hasher.update((tree.len() as u64).to_be_bytes());
    for (key, value) in tree {
        hash_str(hasher, key);
        hash_value(hasher, value);
    }
}

fn hash_value(hasher: &mut Sha256, value: &ModelValue) {
    match value {
        ModelValue::Scalar(scalar) => hash_scalar(hasher, scalar),
        ModelValue::Sequence(items) => {
            hasher.update(b"[");
            hasher.update((items.len() as u64).to_be_bytes());
            for item in items {
                hash_scalar(hasher, item);
            }
        }
        ModelValue::Node(tree) => hash_tree(hasher, tree),
    }
}

fn hash_scalar(hasher: &mut Sha256, scalar: &Scalar) {
    match scalar {
        Scalar::Null => hasher.update(b"n"),
        Scalar::Bool(b) => hasher.update(if *b { b"t" } else { b"f" }),
        Scalar::Int(n) => {
            hasher.update(b"i");
            hasher.update(n.to_be_bytes());
        }
        Scalar::Float(x) => {
            hasher.update(b"d");
            hasher.update(x.to_bits().to_be_bytes());
        }
        Scalar::String(s) => {
            hasher.update(b"s");
            hash_str(hasher, s);
        }
    }
}

fn hash_str(hasher: &mut Sha256, s: &str) {
    hasher.update((s.len() as u64).to_be_bytes());
    hasher.update(s.as_bytes());
}
