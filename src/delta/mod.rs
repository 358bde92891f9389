//! Delta module for comparing configuration models.
//!
//! This module walks a current and a past model, reconstructs the minimal
//! tree of changed and added values, and classifies whether that delta can
//! be applied to a running system.

mod builder;
mod changes;
mod classifier;
mod comparator;
mod engine;
mod walker;

pub use builder::{build_from_paths, merge_trees, DeltaBuilder};
pub use changes::ChangeSet;
pub use classifier::{SafetyClassifier, Verdict};
pub use comparator::TreeComparator;
pub use engine::{compute_delta, DeltaEngine, DeltaReport};
pub use walker::walk_changed_key;
