//! Recursive walk over one changed top-level key.
//!
//! The walk descends depth-first through every changed key whose current and
//! past values are both mappings. Anything else that changed (a scalar, a
//! sequence, or a mapping replacing a non-mapping) is recorded as a changed
//! leaf. Added and removed keys are recorded at the level where they appear,
//! without descending into them.

use tracing::trace;

use crate::model::{DottedPath, ModelTree, ModelValue};

use super::changes::ChangeSet;
use super::comparator::TreeComparator;

/// Expands one top-level key into the dotted paths of everything that
/// changed beneath it.
///
/// Returns an empty set when the key is missing from either tree or when
/// both values are equal.
#[must_use]
pub fn walk_changed_key(current: &ModelTree, past: &ModelTree, key: &str) -> ChangeSet {
    let token = DottedPath::root(key);
    match (current.get(key), past.get(key)) {
        (Some(ModelValue::Node(cur)), Some(ModelValue::Node(old))) => {
            walk_level(cur, old, &token, key)
        }
        (Some(cur), Some(old)) if cur != old => {
            trace!(root = key, path = %token, "top-level leaf changed");
            ChangeSet {
                changed: vec![token],
                ..ChangeSet::new()
            }
        }
        _ => ChangeSet::new(),
    }
}

/// Walks one level of two mappings located at `token`.
///
/// `root` is only used for trace output.
fn walk_level(current: &ModelTree, past: &ModelTree, token: &DottedPath, root: &str) -> ChangeSet {
    trace!(root, token = %token, "entering level");

    let cmp = TreeComparator::new(current, past);
    let mut changes = ChangeSet::new();

    for key in cmp.changed() {
        let path = token.child(key);
        match (current.get(key), past.get(key)) {
            (Some(ModelValue::Node(cur)), Some(ModelValue::Node(old))) => {
                trace!(root, path = %path, "descending into changed mapping");
                changes.extend(walk_level(cur, old, &path, root));
            }
            _ => {
                trace!(root, path = %path, "changed leaf");
                changes.changed.push(path);
            }
        }
    }

    for key in cmp.added() {
        let path = token.child(key);
        trace!(root, path = %path, "added key");
        changes.added.push(path);
    }

    for key in cmp.removed() {
        let path = token.child(key);
        trace!(root, path = %path, "removed key");
        changes.removed.push(path);
    }

    trace!(
        root,
        token = %token,
        changed = changes.changed.len(),
        added = changes.added.len(),
        removed = changes.removed.len(),
        "leaving level"
    );
    changes
}
