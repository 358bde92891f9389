//! Key-level comparison of two configuration trees.

use std::collections::BTreeSet;

use crate::model::ModelTree;

/// Compares the keys of one level of two trees.
///
/// Every key of either tree falls into exactly one of the four sets
/// returned by [`added`](Self::added), [`removed`](Self::removed),
/// [`changed`](Self::changed) and [`unchanged`](Self::unchanged).
#[derive(Debug, Clone, Copy)]
pub struct TreeComparator<'a> {
    current: &'a ModelTree,
    past: &'a ModelTree,
}

impl<'a> TreeComparator<'a> {
    /// Creates a comparator over `current` and `past`.
    #[must_use]
    pub const fn new(current: &'a ModelTree, past: &'a ModelTree) -> Self {
        Self { current, past }
    }

    /// Keys present in `current` but not in `past`.
    #[must_use]
    pub fn added(&self) -> BTreeSet<&'a str> {
        self.current
            .keys()
            .filter(|k| !self.past.contains_key(*k))
            .map(String::as_str)
            .collect()
    }

    /// Keys present in `past` but not in `current`.
    #[must_use]
    pub fn removed(&self) -> BTreeSet<&'a str> {
        self.past
            .keys()
            .filter(|k| !self.current.contains_key(*k))
            .map(String::as_str)
            .collect()
    }

    /// Keys present in both whose values differ anywhere in their subtree.
    #[must_use]
    pub fn changed(&self) -> BTreeSet<&'a str> {
        self.intersection(false)
    }

    /// Keys present in both with deeply equal values.
    #[must_use]
    pub fn unchanged(&self) -> BTreeSet<&'a str> {
        self.intersection(true)
    }

    /// Returns true if the two levels are deeply equal.
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.current == self.past
    }

    fn intersection(&self, equal: bool) -> BTreeSet<&'a str> {
        self.current
            .iter()
            .filter_map(|(key, value)| {
                self.past
                    .get(key)
                    .filter(|past| (*past == value) == equal)
                    .map(|_| key.as_str())
            })
            .collect()
    }
}
