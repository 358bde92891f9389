//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Model delta - decides whether a configuration change can be applied online.
#[derive(Parser, Debug)]
#[command(name = "model-delta")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a settings file.
    #[arg(short, long, global = true, env = "MODEL_DELTA_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare two models and exit with the verdict code
    /// (0 unsafe, 1 safe, 2 fatal, 3 no change).
    Compare {
        /// The current model.
        current: PathBuf,

        /// The past model.
        past: PathBuf,

        /// Where to write the delta document (overrides settings).
        #[arg(long)]
        delta_file: Option<PathBuf>,

        /// Do not write the delta document.
        #[arg(long)]
        no_write: bool,
    },

    /// Render a model in the delta document format.
    Render {
        /// The model to render.
        model: PathBuf,
    },

    /// Print the fingerprint of one or more models.
    Fingerprint {
        /// Models to fingerprint.
        #[arg(required = true)]
        models: Vec<PathBuf>,

        /// Print the short form.
        #[arg(long)]
        short: bool,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::try_parse_from([
            "model-delta",
            "--output",
            "json",
            "compare",
            "current.yaml",
            "past.yaml",
            "--no-write",
        ])
        .expect("arguments should parse");

        assert!(matches!(cli.output, OutputFormat::Json));
        match cli.command {
            Commands::Compare {
                current,
                past,
                delta_file,
                no_write,
            } => {
                assert_eq!(current, PathBuf::from("current.yaml"));
                assert_eq!(past, PathBuf::from("past.yaml"));
                assert!(delta_file.is_none());
                assert!(no_write);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_fingerprint_requires_models() {
        assert!(Cli::try_parse_from(["model-delta", "fingerprint"]).is_err());
    }
}
