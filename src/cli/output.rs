//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying
//! comparison results to the user in various formats.

use colored::Colorize;
use std::fmt::Write;
use std::path::PathBuf;
use tabled::{Table, Tabled};

use crate::delta::{DeltaReport, Verdict};
use crate::model::{DottedPath, ModelHasher};

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Change row for table display.
#[derive(Tabled)]
struct ChangeRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Change")]
    change: String,
    #[tabled(rename = "Path")]
    path: String,
}

/// Fingerprint row for table display.
#[derive(Tabled)]
struct FingerprintRow {
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Fingerprint")]
    fingerprint: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a comparison report for display.
    #[must_use]
    pub fn format_report(&self, report: &DeltaReport) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&ReportJson::from(report)).unwrap_or_default()
            }
            OutputFormat::Text => Self::format_report_text(report),
        }
    }

    /// Formats a report as text.
    fn format_report_text(report: &DeltaReport) -> String {
        let hasher = ModelHasher::new();
        let mut output = String::new();

        let _ = writeln!(output, "\nModel comparison");
        let _ = writeln!(
            output,
            "   Current: {}  Past: {}\n",
            hasher.short_hash(&report.current_fingerprint),
            hasher.short_hash(&report.past_fingerprint)
        );

        let changes = &report.changes;
        let rows: Vec<ChangeRow> = labelled(&changes.changed, "~changed")
            .chain(labelled(&changes.added, "+added"))
            .chain(labelled(&changes.removed, "-removed"))
            .enumerate()
            .map(|(i, (label, path))| ChangeRow {
                index: i + 1,
                change: Self::color_change(label),
                path: path.to_string(),
            })
            .collect();

        if rows.is_empty() {
            output.push_str("   No differences found.\n");
        } else {
            output.push_str(&Table::new(rows).to_string());
            output.push('\n');
        }

        let _ = write!(
            output,
            "\nDelta: {} changed, {} added, {} removed\n",
            changes.changed.len().to_string().yellow(),
            changes.added.len().to_string().green(),
            changes.removed.len().to_string().red()
        );
        let _ = writeln!(
            output,
            "Verdict: {} (exit code {})",
            Self::format_verdict(report.verdict),
            report.verdict.exit_code()
        );

        output
    }

    /// Formats model fingerprints.
    #[must_use]
    pub fn format_fingerprints(&self, fingerprints: &[(PathBuf, String)]) -> String {
        match self.format {
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = fingerprints
                    .iter()
                    .map(|(path, hash)| (path.display().to_string(), hash.clone().into()))
                    .collect();
                serde_json::to_string_pretty(&map).unwrap_or_default()
            }
            OutputFormat::Text => {
                let rows: Vec<FingerprintRow> = fingerprints
                    .iter()
                    .map(|(path, hash)| FingerprintRow {
                        model: path.display().to_string(),
                        fingerprint: hash.clone(),
                    })
                    .collect();
                format!("{}\n", Table::new(rows))
            }
        }
    }

    /// Formats a verdict with color.
    fn format_verdict(verdict: Verdict) -> String {
        match verdict {
            Verdict::Safe => "safe".green().to_string(),
            Verdict::Unsafe => "unsafe".yellow().to_string(),
            Verdict::Fatal => "fatal".red().bold().to_string(),
            Verdict::NoChange => "no change".dimmed().to_string(),
        }
    }

    /// Colors a change label.
    fn color_change(label: &str) -> String {
        match label.as_bytes().first() {
            Some(b'+') => label.green().to_string(),
            Some(b'-') => label.red().to_string(),
            _ => label.yellow().to_string(),
        }
    }
}

fn labelled<'a>(
    paths: &'a [DottedPath],
    label: &'static str,
) -> impl Iterator<Item = (&'static str, &'a DottedPath)> {
    paths.iter().map(move |path| (label, path))
}

// JSON serialization helpers

#[derive(serde::Serialize)]
struct ReportJson<'a> {
    verdict: Verdict,
    exit_code: u8,
    compared_at: String,
    current_fingerprint: &'a str,
    past_fingerprint: &'a str,
    changed: &'a [DottedPath],
    added: &'a [DottedPath],
    removed: &'a [DottedPath],
    delta: &'a crate::model::ModelTree,
}

impl<'a> From<&'a DeltaReport> for ReportJson<'a> {
    fn from(report: &'a DeltaReport) -> Self {
        Self {
            verdict: report.verdict,
            exit_code: report.verdict.exit_code(),
            compared_at: report.compared_at.to_rfc3339(),
            current_fingerprint: &report.current_fingerprint,
            past_fingerprint: &report.past_fingerprint,
            changed: &report.changes.changed,
            added: &report.changes.added,
            removed: &report.changes.removed,
            delta: &report.delta,
        }
    }
}
