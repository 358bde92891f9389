// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # Model Delta
//!
//! Compares two snapshots of a declarative configuration model and decides
//! whether the difference can be applied to a running system without a
//! restart.
//!
//! ## Overview
//!
//! A comparison run:
//!
//! 1. **Compares** the top-level sections of the current and past models
//! 2. **Walks** every changed section, recording dotted paths of changed
//!    leaves, added keys and removed keys
//! 3. **Builds** a delta tree holding only changed and added values
//! 4. **Classifies** the delta as safe, unsafe, fatal, or no change
//!
//! Removals are detected and make a delta unsafe, but are never part of the
//! delta tree.
//!
//! ## Modules
//!
//! - [`model`]: Model values, dotted paths, parsing and fingerprints
//! - [`delta`]: Comparison, delta reconstruction and classification
//! - [`serializer`]: Delta document rendering
//! - [`config`]: Settings and environment overrides
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```
//! use model_delta::delta::{DeltaEngine, Verdict};
//! use model_delta::model::ModelParser;
//!
//! let parser = ModelParser::new();
//! let current = parser.parse_str("resources: {Pool: {Max: 10, Min: 1}}", None)?;
//! let past = parser.parse_str("resources: {Pool: {Max: 10}}", None)?;
//!
//! let report = DeltaEngine::new().compare(&current, &past)?;
//! assert_eq!(report.verdict, Verdict::Safe);
//! # Ok::<(), model_delta::ModelDeltaError>(())
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod delta;
pub mod error;
pub mod model;
pub mod serializer;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{DiffSettings, SettingsLoader, SettingsValidator};
pub use delta::{DeltaEngine, DeltaReport, SafetyClassifier, TreeComparator, Verdict};
pub use error::{ModelDeltaError, Result};
pub use model::{DottedPath, ModelParser, ModelTree, ModelValue};
pub use serializer::DeltaSerializer;
