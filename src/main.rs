//! Model delta CLI entrypoint.
//!
//! This is the main entrypoint for the model-delta command-line tool.
//! `compare` exits with the verdict code; any error exits with
//! [`EXIT_ERROR`], which lies outside the verdict range.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use model_delta::cli::{Cli, Commands, OutputFormatter};
use model_delta::config::{DiffSettings, SettingsLoader, SettingsValidator};
use model_delta::delta::DeltaEngine;
use model_delta::error::Result;
use model_delta::model::{ModelHasher, ModelParser};
use model_delta::serializer::DeltaSerializer;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Exit code for errors; verdicts use 0 to 3.
const EXIT_ERROR: u8 = 4;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(cli.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Initialize logging
    init_logging(cli.verbose, settings.debug);

    match run(cli, &settings) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            if e.is_defect() {
                error!("Comparison aborted on an inconsistent delta: {e}");
            }
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool, debug: bool) {
    let filter = if debug {
        EnvFilter::new("trace")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves and validates settings.
fn load_settings(path: Option<&Path>) -> Result<DiffSettings> {
    let settings = SettingsLoader::new().load(path)?;
    SettingsValidator::new().validate(&settings)?;
    Ok(settings)
}

/// Runs the selected command and returns the process exit code.
fn run(cli: Cli, settings: &DiffSettings) -> Result<u8> {
    let formatter = OutputFormatter::new(cli.output);

    match cli.command {
        Commands::Compare {
            current,
            past,
            delta_file,
            no_write,
        } => cmd_compare(
            &current,
            &past,
            delta_file.as_deref(),
            no_write,
            settings,
            &formatter,
        ),
        Commands::Render { model } => cmd_render(&model).map(|()| 0),
        Commands::Fingerprint { models, short } => {
            cmd_fingerprint(&models, short, &formatter).map(|()| 0)
        }
    }
}

/// Compare two models.
fn cmd_compare(
    current_path: &Path,
    past_path: &Path,
    delta_file: Option<&Path>,
    no_write: bool,
    settings: &DiffSettings,
    formatter: &OutputFormatter,
) -> Result<u8> {
    let parser = ModelParser::new();
    let current = parser.load_file(current_path)?;
    let past = parser.load_file(past_path)?;

    let engine = DeltaEngine::from_settings(settings);
    let report = engine.compare(&current, &past)?;

    eprintln!("{}", formatter.format_report(&report));

    if no_write {
        debug!("Skipping delta document");
    } else {
        let target = delta_file.unwrap_or(settings.delta_output.as_path());
        DeltaSerializer::new().write_to(&report.delta, target)?;
    }

    info!("Exiting with code {}", report.verdict.exit_code());
    Ok(report.verdict.exit_code())
}

/// Render a model in the delta document format.
fn cmd_render(model_path: &Path) -> Result<()> {
    let model = ModelParser::new().load_file(model_path)?;
    let rendered = DeltaSerializer::new().render(&model);

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

/// Print model fingerprints.
fn cmd_fingerprint(models: &[PathBuf], short: bool, formatter: &OutputFormatter) -> Result<()> {
    let parser = ModelParser::new();
    let hasher = ModelHasher::new();

    let mut fingerprints = Vec::with_capacity(models.len());
    for path in models {
        let model = parser.load_file(path)?;
        let hash = hasher.fingerprint(&model);
        let hash = if short { hasher.short_hash(&hash) } else { hash };
        fingerprints.push((path.clone(), hash));
    }

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", formatter.format_fingerprints(&fingerprints))?;
    Ok(())
}
