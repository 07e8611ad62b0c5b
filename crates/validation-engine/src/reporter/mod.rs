//! Validation report output
//!
//! Formats a [`ValidationReport`] for people or machines.
//!
//! # Output Formats
//!
//! - **Console**: framed summary with failures grouped by severity
//! - **JSON** / **JSON (pretty)**: metrics, summary and results for tooling
//! - **CSV**: one row per rule, the tabular export used by spreadsheets
//! - **Markdown**: executive summary and failed validations for sharing
//!
//! # Example
//!
//! ```no_run
//! use validation_engine::{OutputFormat, Reporter, ValidationEngine};
//!
//! # fn example() -> anyhow::Result<()> {
//! let outcome = brd_parser::parse("0.1 Executive Summary\nmodernization", false);
//! let report = ValidationEngine::default().validate(&outcome.document);
//!
//! Reporter::new(OutputFormat::Console).report(&report)?;
//! Reporter::new(OutputFormat::Csv).write_to_file(&report, "results.csv")?;
//! # Ok(())
//! # }
//! ```

mod console;
mod csv;
mod json;
mod markdown;

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use shared_types::ValidationResult;

use crate::report::ValidationReport;

pub use console::ConsoleReporter;
pub use csv::CsvReporter;
pub use json::JsonReporter;
pub use markdown::MarkdownReporter;

/// Output format for validation reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Framed text for terminals
    #[default]
    Console,
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Comma-separated rows, RFC 4180 quoting
    Csv,
    /// Markdown document
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "console" | "text" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "json-pretty" | "pretty" => Ok(OutputFormat::JsonPretty),
            "csv" => Ok(OutputFormat::Csv),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Console => "console",
            OutputFormat::Json => "json",
            OutputFormat::JsonPretty => "json-pretty",
            OutputFormat::Csv => "csv",
            OutputFormat::Markdown => "markdown",
        };
        f.write_str(name)
    }
}

/// One row of the tabular export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub rule_id: String,
    pub description: String,
    pub category: String,
    pub severity: String,
    pub status: String,
    pub details: String,
    pub execution_time_ms: f64,
}

impl ExportRow {
    pub const HEADERS: [&'static str; 7] = [
        "Rule ID",
        "Description",
        "Category",
        "Severity",
        "Status",
        "Details",
        "Execution Time (ms)",
    ];

    pub fn from_result(result: &ValidationResult) -> Self {
        Self {
            rule_id: result.rule_id.clone(),
            description: result.description.clone(),
            category: result.category.clone(),
            severity: result.severity.to_string(),
            status: result.status_label().to_string(),
            details: result.details.clone(),
            execution_time_ms: (result.execution_time * 1000.0 * 100.0).round() / 100.0,
        }
    }
}

/// Rows of the tabular export in execution order
pub fn export_rows(report: &ValidationReport) -> Vec<ExportRow> {
    report.results.iter().map(ExportRow::from_result).collect()
}

/// Reporter for validation results
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Report to stdout
    pub fn report(&self, report: &ValidationReport) -> Result<()> {
        let output = self.format_report(report)?;
        print!("{}", output);
        io::stdout().flush()?;
        Ok(())
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, report: &ValidationReport, path: P) -> Result<()> {
        let output = self.format_report(report)?;
        fs::write(path, output)?;
        Ok(())
    }

    pub fn format_report(&self, report: &ValidationReport) -> Result<String> {
        match self.format {
            OutputFormat::Console => ConsoleReporter::format(report),
            OutputFormat::Json => JsonReporter::format(report, false),
            OutputFormat::JsonPretty => JsonReporter::format(report, true),
            OutputFormat::Csv => CsvReporter::format(report),
            OutputFormat::Markdown => MarkdownReporter::format(report),
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::sample_report;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_format_mentions_rules() {
        let report = sample_report();
        for format in [
            OutputFormat::Console,
            OutputFormat::Json,
            OutputFormat::JsonPretty,
            OutputFormat::Csv,
            OutputFormat::Markdown,
        ] {
            let output = Reporter::new(format).format_report(&report).unwrap();
            assert!(output.contains("V001"), "{} output lacks V001", format);
        }
    }

    #[test]
    fn test_format_names_round_trip() {
        for name in ["console", "json", "json-pretty", "csv", "markdown"] {
            let format: OutputFormat = name.parse().unwrap();
            assert_eq!(format.to_string(), name);
        }
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_export_rows() {
        let rows = export_rows(&sample_report());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].status, "FAIL");
        assert_eq!(rows[1].status, "PASS");
        assert_eq!(rows[0].severity, "Critical");
        assert_eq!(rows[0].execution_time_ms, 1.25);
    }

    #[test]
    fn test_write_to_file() {
        let path = std::env::temp_dir().join(format!("brd-report-{}.md", std::process::id()));
        Reporter::new(OutputFormat::Markdown)
            .write_to_file(&sample_report(), &path)
            .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("# BRD Validation Executive Summary"));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_default_format() {
        assert_eq!(Reporter::default().format(), OutputFormat::Console);
    }
}
