//! Settings module for the model delta system.
//!
//! This module handles everything that tunes a comparison run:
//! - Section names and the addition depth used by the classifier
//! - Where the delta document is written
//! - Environment overrides, including the debug toggle
//! - Validation of the resolved settings

mod loader;
mod settings;
mod validator;

pub use loader::{SettingsLoader, DEBUG_ENV_VAR, DEPTH_ENV_VAR, OUTPUT_ENV_VAR};
pub use settings::{
    DiffSettings, DEFAULT_ADDITION_DEPTH, DEFAULT_DELTA_OUTPUT, DEFAULT_DEPLOYMENT_SECTION,
    DEFAULT_TOPOLOGY_SECTION,
};
pub use validator::SettingsValidator;
