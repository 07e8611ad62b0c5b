//! Command-line interface definitions and the non-server commands

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use validation_engine::{OutputFormat, Reporter, RuleRegistry};

use crate::config::FrameworkConfig;

#[derive(Parser, Debug)]
#[command(name = "brd-validator")]
#[command(version)]
#[command(about = "Validate business requirements documents against the BRD framework")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse and validate a document; exits with 1 when a critical rule fails
    Check {
        /// Document to validate (plain text, markdown, or JSON with --structured)
        file: PathBuf,

        /// Treat the file as a structured JSON payload
        #[arg(long)]
        structured: bool,

        /// Report format: console, json, json-pretty, csv, markdown
        #[arg(short, long, default_value = "console")]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the parsed document as JSON to stderr
        #[arg(long)]
        show_document: bool,
    },

    /// List the registered rules grouped by category
    Rules {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Serve the HTTP API
    Serve {
        /// Host address to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Largest document `check` will read
pub const MAX_DOCUMENT_BYTES: u64 = 200 * 1024 * 1024;

/// File extensions `check` accepts, without the dot
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "json", "md"];

pub struct CheckOptions<'a> {
    pub file: &'a Path,
    pub structured: bool,
    pub format: OutputFormat,
    pub output: Option<&'a Path>,
    pub config: Option<&'a Path>,
    pub show_document: bool,
}

/// Returns whether the document passed every critical rule
pub fn run_check(options: CheckOptions<'_>) -> anyhow::Result<bool> {
    let config = FrameworkConfig::load(options.config)?;
    let extension = check_document_file(options.file)?;
    if extension == "json" && !options.structured {
        warn!(
            "{} looks like JSON but --structured was not given; parsing it as free text",
            options.file.display()
        );
    }

    let bytes = fs::read(options.file)
        .with_context(|| format!("Failed to read document: {}", options.file.display()))?;

    info!("Checking {}", options.file.display());
    let outcome = config.parser().parse_bytes(&bytes, options.structured);

    if options.show_document {
        let document = serde_json::to_string_pretty(&outcome.document)?;
        let extraction = serde_json::to_string_pretty(&outcome.extraction_summary())?;
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{}", extraction)?;
        writeln!(stderr, "{}", document)?;
    }

    let report = config.engine().validate(&outcome.document);
    let reporter = Reporter::new(options.format);
    match options.output {
        Some(path) => {
            reporter
                .write_to_file(&report, path)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => reporter.report(&report)?,
    }

    Ok(report.is_document_valid())
}

/// Reject files that are too large or of an unsupported type.
/// Returns the lowercased extension.
fn check_document_file(path: &Path) -> anyhow::Result<String> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;
    if metadata.len() > MAX_DOCUMENT_BYTES {
        bail!(
            "File size ({:.1}MB) exceeds limit ({}MB)",
            metadata.len() as f64 / 1024.0 / 1024.0,
            MAX_DOCUMENT_BYTES / 1024 / 1024
        );
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        let supported: Vec<String> = SUPPORTED_EXTENSIONS.iter().map(|ext| format!(".{}", ext)).collect();
        bail!(
            "Unsupported file format: {}. Supported formats: {}",
            path.display(),
            supported.join(", ")
        );
    }

    Ok(extension)
}

pub fn run_rules(config: Option<&Path>) -> anyhow::Result<()> {
    let config = FrameworkConfig::load(config)?;
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", format_rules(&config.registry()))?;
    stdout.flush()?;
    Ok(())
}

fn format_rules(registry: &RuleRegistry) -> String {
    let mut output = String::new();
    for (category, rules) in registry.by_category() {
        output.push_str(category);
        output.push('\n');
        for rule in rules {
            output.push_str(&format!(
                "  {}  {:<8}  {}\n",
                rule.id(),
                rule.severity().as_str(),
                rule.description()
            ));
        }
    }
    output
}
