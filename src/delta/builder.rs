//! Reconstruction of a delta tree from dotted paths.
//!
//! Each path becomes a single-branch tree whose leaf is copied from the
//! current model, and branches are deep-merged into one result.

use std::collections::btree_map::Entry;
use tracing::debug;

use crate::error::{DeltaError, Result};
use crate::model::{lookup, DottedPath, ModelTree, ModelValue};

/// Incrementally builds a delta tree against a source model.
#[derive(Debug)]
pub struct DeltaBuilder<'a> {
    /// Model the leaf values are copied from.
    source: &'a ModelTree,
    /// Delta accumulated so far.
    delta: ModelTree,
}

impl<'a> DeltaBuilder<'a> {
    /// Creates a builder copying values from `source`.
    #[must_use]
    pub const fn new(source: &'a ModelTree) -> Self {
        Self {
            source,
            delta: ModelTree::new(),
        }
    }

    /// Adds one path to the delta.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::UnresolvedPath`] if the path does not exist in
    /// the source model. Paths produced by the walker always resolve, so this
    /// indicates a defect.
    pub fn add_path(&mut self, path: &DottedPath) -> Result<()> {
        let fragment = fragment_for(path, self.source)?;
        merge_trees(&mut self.delta, fragment);
        Ok(())
    }

    /// Adds every path of an iterator to the delta.
    ///
    /// # Errors
    ///
    /// Fails on the first path that does not resolve.
    pub fn add_paths<'p>(&mut self, paths: impl IntoIterator<Item = &'p DottedPath>) -> Result<()> {
        for path in paths {
            self.add_path(path)?;
        }
        Ok(())
    }

    /// Returns the delta built so far.
    #[must_use]
    pub fn finish(self) -> ModelTree {
        self.delta
    }
}

/// Builds a delta tree holding the value of every path in `paths`.
///
/// # Errors
///
/// Fails if a path does not resolve in `current`.
pub fn build_from_paths<'p>(
    paths: impl IntoIterator<Item = &'p DottedPath>,
    current: &ModelTree,
) -> Result<ModelTree> {
    let mut builder = DeltaBuilder::new(current);
    builder.add_paths(paths)?;
    Ok(builder.finish())
}

/// Deep-merges `from` into `into`.
///
/// Missing keys are inserted wholesale, mappings present on both sides are
/// merged recursively, and any other collision is won by `from`.
pub fn merge_trees(into: &mut ModelTree, from: ModelTree) {
    for (key, new_value) in from {
        match into.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(new_value);
            }
            Entry::Occupied(mut slot) => match (slot.get_mut(), new_value) {
                (ModelValue::Node(existing), ModelValue::Node(incoming)) => {
                    merge_trees(existing, incoming);
                }
                (existing, incoming) => *existing = incoming,
            },
        }
    }
}

/// Builds the single-branch tree for one path.
fn fragment_for(path: &DottedPath, source: &ModelTree) -> Result<ModelTree> {
    if path.is_empty() {
        return Err(DeltaError::EmptyPath.into());
    }

    let leaf = lookup(source, path).ok_or_else(|| DeltaError::UnresolvedPath {
        path: path.to_string(),
    })?;
    debug!("Adding delta path {path}");

    let segments: Vec<&str> = path.segments().collect();
    let (last, parents) = segments.split_last().ok_or(DeltaError::EmptyPath)?;

    let mut fragment = ModelTree::new();
    fragment.insert((*last).to_string(), leaf.clone());
    for segment in parents.iter().rev() {
        let mut parent = ModelTree::new();
        parent.insert((*segment).to_string(), ModelValue::Node(fragment));
        fragment = parent;
    }
    Ok(fragment)
}
