//! Flat change records produced by the delta walker.

use serde::Serialize;

use crate::model::DottedPath;

/// Dotted paths of every change found while walking two trees.
///
/// A fresh set is produced for each top-level key; the engine appends them
/// into one cumulative set per comparison run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    /// Leaves whose value changed.
    pub changed: Vec<DottedPath>,
    /// Keys that only exist in the current tree.
    pub added: Vec<DottedPath>,
    /// Keys that only exist in the past tree.
    pub removed: Vec<DottedPath>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            changed: Vec::new(),
            added: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Appends all records of `other`, keeping their order.
    pub fn extend(&mut self, other: Self) {
        self.changed.extend(other.changed);
        self.added.extend(other.added);
        self.removed.extend(other.removed);
    }

    /// Paths that contribute values to the delta tree.
    ///
    /// Removed paths are never part of the delta.
    pub fn delta_paths(&self) -> impl Iterator<Item = &DottedPath> {
        self.changed.iter().chain(self.added.iter())
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.added.is_empty() && self.removed.is_empty()
    }

    /// Total number of recorded paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changed.len() + self.added.len() + self.removed.len()
    }
}
