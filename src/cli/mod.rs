//! CLI module for the model delta tool.
//!
//! This module provides the command-line interface for comparing
//! configuration models.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::OutputFormatter;
