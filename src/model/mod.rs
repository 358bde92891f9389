//! Configuration model module.
//!
//! This module holds everything about a single model snapshot:
//! - The tagged value types making up a configuration tree
//! - Dotted paths addressing locations inside a tree
//! - Parsing snapshots from YAML or JSON
//! - Fingerprinting snapshots for change detection

mod hash;
mod parser;
mod path;
mod value;

pub use hash::ModelHasher;
pub use parser::ModelParser;
pub use path::{DottedPath, SEPARATOR};
pub use value::{leaves, lookup, ModelTree, ModelValue, Scalar};
