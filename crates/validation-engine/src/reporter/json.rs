//! JSON reporter

use anyhow::Result;
use serde::Serialize;
use shared_types::{ValidationResult, ValidationSummary};

use crate::report::{ReportMetrics, ValidationReport};

#[derive(Serialize)]
struct JsonReport<'a> {
    metrics: ReportMetrics,
    summary: &'a ValidationSummary,
    results: &'a [ValidationResult],
}

pub struct JsonReporter;

impl JsonReporter {
    /// Metrics, summary and results as one JSON object
    pub fn format(report: &ValidationReport, pretty: bool) -> Result<String> {
        let document = JsonReport {
            metrics: report.metrics(),
            summary: &report.summary,
            results: &report.results,
        };
        let output = if pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(output)
    }
}
