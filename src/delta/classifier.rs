//! Safety classification of a computed delta.
//!
//! Decides whether a delta can be applied to a running system without a
//! restart. The rules are evaluated in a fixed order:
//!
//! 1. Any change under the deployment section is unsafe.
//! 2. An empty delta with no removals means nothing changed.
//! 3. Any removal is unsafe.
//! 4. Additions go through [`SafetyClassifier::classify_additions`].
//! 5. Everything else (attribute changes) is safe.

use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::config::{
    DiffSettings, DEFAULT_ADDITION_DEPTH, DEFAULT_DEPLOYMENT_SECTION, DEFAULT_TOPOLOGY_SECTION,
};
use crate::model::{DottedPath, ModelTree};

use super::changes::ChangeSet;

/// Outcome of classifying a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The delta cannot be applied online.
    Unsafe,
    /// The delta can be applied online.
    Safe,
    /// The delta changes the topology shape and cannot be applied at all
    /// without a restart.
    Fatal,
    /// The two models are equivalent.
    NoChange,
}

impl Verdict {
    /// Process exit code for this verdict.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Unsafe => 0,
            Self::Safe => 1,
            Self::Fatal => 2,
            Self::NoChange => 3,
        }
    }

    /// Parses a verdict back from its exit code.
    #[must_use]
    pub const fn from_exit_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Unsafe),
            1 => Some(Self::Safe),
            2 => Some(Self::Fatal),
            3 => Some(Self::NoChange),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unsafe => "unsafe",
            Self::Safe => "safe",
            Self::Fatal => "fatal",
            Self::NoChange => "no change",
        };
        write!(f, "{s}")
    }
}

/// Classifies deltas according to the online update policy.
#[derive(Debug, Clone)]
pub struct SafetyClassifier {
    /// Top-level section holding application deployments.
    deployment_section: String,
    /// Top-level section holding the topology definition.
    topology_section: String,
    /// Segments that must exist in the past model for an addition to count
    /// as an attribute of an existing entity.
    addition_depth: usize,
}

impl Default for SafetyClassifier {
    fn default() -> Self {
        Self {
            deployment_section: String::from(DEFAULT_DEPLOYMENT_SECTION),
            topology_section: String::from(DEFAULT_TOPOLOGY_SECTION),
            addition_depth: DEFAULT_ADDITION_DEPTH,
        }
    }
}

impl SafetyClassifier {
    /// Creates a classifier with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a classifier using the sections and depth from `settings`.
    #[must_use]
    pub fn from_settings(settings: &DiffSettings) -> Self {
        Self {
            deployment_section: settings.deployment_section.clone(),
            topology_section: settings.topology_section.clone(),
            addition_depth: settings.addition_depth,
        }
    }

    /// Classifies a delta.
    ///
    /// `changes` is the cumulative change set of the run and `past` the
    /// older model, used to judge additions.
    #[must_use]
    pub fn classify(&self, delta: &ModelTree, changes: &ChangeSet, past: &ModelTree) -> Verdict {
        if delta.contains_key(&self.deployment_section) {
            debug!("Delta touches '{}'", self.deployment_section);
            return Verdict::Unsafe;
        }

        if delta.is_empty() && changes.removed.is_empty() {
            return Verdict::NoChange;
        }

        if !changes.removed.is_empty() {
            debug!("Delta removes {} entries", changes.removed.len());
            return Verdict::Unsafe;
        }

        if !changes.added.is_empty() {
            return self.classify_additions(&changes.added, past);
        }

        Verdict::Safe
    }

    /// Classifies a list of added paths.
    ///
    /// Paths are examined in order and the scan stops at the first one not
    /// found in `past`. The result is fatal only if a topology path was seen
    /// before the scan stopped on an unknown path. Only that stopping path
    /// decides; later paths are never looked at.
    #[must_use]
    pub fn classify_additions(&self, added: &[DottedPath], past: &ModelTree) -> Verdict {
        let mut has_topology = false;
        let mut found = true;
        let mut last = None;

        for path in added {
            if path.in_section(&self.topology_section) {
                has_topology = true;
            }
            found = self.found_in_past(path, past);
            last = Some(path);
            if !found {
                break;
            }
        }

        if has_topology && !found {
            if let Some(path) = last {
                warn!("Found changes not supported for online update: {path}");
            }
            return Verdict::Fatal;
        }

        Verdict::Safe
    }

    /// Returns true if at least `addition_depth` leading segments of `path`
    /// exist in `past`.
    ///
    /// The walk stops at the first missing segment or at a value that is not
    /// a mapping.
    #[must_use]
    pub fn found_in_past(&self, path: &DottedPath, past: &ModelTree) -> bool {
        let matched = matched_segments(path, past);
        debug!("{path}: {matched} segments present in past model");
        matched >= self.addition_depth
    }
}

fn matched_segments(path: &DottedPath, past: &ModelTree) -> usize {
    let mut level = Some(past);
    let mut matched = 0;
    for segment in path.segments() {
        let Some(tree) = level else { break };
        match tree.get(segment) {
            Some(value) => {
                matched += 1;
                level = value.as_node();
            }
            None => break,
        }
    }
    matched
}
