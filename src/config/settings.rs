//! Settings type definitions.
//!
//! Settings are read from an optional YAML file; every field has a default
//! so an empty or missing file yields the standard online update policy.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level section holding application deployments.
pub const DEFAULT_DEPLOYMENT_SECTION: &str = "appDeployments";

/// Top-level section holding the topology definition.
pub const DEFAULT_TOPOLOGY_SECTION: &str = "topology";

/// Number of leading path segments that must already exist for an addition
/// to be treated as an attribute of an existing entity.
pub const DEFAULT_ADDITION_DEPTH: usize = 3;

/// Where the delta document is written.
pub const DEFAULT_DELTA_OUTPUT: &str = "/tmp/diffed_model.json";

/// Settings for a comparison run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffSettings {
    /// Section whose presence in the delta makes it unsafe.
    pub deployment_section: String,

    /// Section whose unseen additions are fatal.
    pub topology_section: String,

    /// Depth heuristic for additions.
    pub addition_depth: usize,

    /// Path of the delta document.
    pub delta_output: PathBuf,

    /// Emit trace output for every comparator step.
    pub debug: bool,
}

impl Default for DiffSettings {
    fn default() -> Self {
        Self {
            deployment_section: String::from(DEFAULT_DEPLOYMENT_SECTION),
            topology_section: String::from(DEFAULT_TOPOLOGY_SECTION),
            addition_depth: DEFAULT_ADDITION_DEPTH,
            delta_output: PathBuf::from(DEFAULT_DELTA_OUTPUT),
            debug: false,
        }
    }
}
