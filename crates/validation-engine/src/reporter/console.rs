//! Console reporter
//!
//! Framed summary, severity breakdown and the failed rules with their details.

use std::fmt::Write;

use anyhow::Result;
use shared_types::{Severity, ValidationResult};

use crate::report::ValidationReport;

const RULE: &str = "────────────────────────────────────────────────────────────────";

pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn format(report: &ValidationReport) -> Result<String> {
        let mut output = String::new();
        let summary = &report.summary;
        let metrics = report.metrics();

        writeln!(output)?;
        writeln!(output, "╔══════════════════════════════════════════════════════════════╗")?;
        writeln!(output, "║                  BRD VALIDATION RESULTS                      ║")?;
        writeln!(output, "╚══════════════════════════════════════════════════════════════╝")?;
        writeln!(output)?;

        let symbol = if report.is_document_valid() { "✓" } else { "✗" };
        writeln!(output, "Status:         {} {}", symbol, metrics.document_status)?;
        writeln!(output, "Overall Score:  {:.1}%", summary.overall_score)?;
        writeln!(output, "Pass Rate:      {:.1}%", metrics.pass_rate)?;
        writeln!(output, "Validated:      {}", summary.timestamp)?;
        writeln!(output, "Duration:       {:.2}s", summary.execution_time)?;
        writeln!(output)?;

        writeln!(output, "Rules:")?;
        writeln!(output, "  Evaluated:  {}", summary.total_rules)?;
        writeln!(output, "  Passed:     {}", summary.passed)?;
        writeln!(output, "  Failed:     {}", summary.failed)?;
        writeln!(output)?;

        writeln!(output, "  ┌──────────┬────────┬────────┐")?;
        writeln!(output, "  │ Severity │ Passed │ Failed │")?;
        writeln!(output, "  ├──────────┼────────┼────────┤")?;
        for (severity, results) in report.results_by_severity() {
            let passed = results.iter().filter(|r| r.passed).count();
            writeln!(
                output,
                "  │ {:<8} │ {:>6} │ {:>6} │",
                severity.as_str(),
                passed,
                summary.failures_for(severity)
            )?;
        }
        writeln!(output, "  └──────────┴────────┴────────┘")?;

        let failed = report.failed_results();
        if !failed.is_empty() {
            writeln!(output)?;
            writeln!(output, "{}", RULE)?;
            writeln!(output, "Failed Validations")?;
            writeln!(output, "{}", RULE)?;
            for severity in Severity::ALL {
                for result in failed.iter().filter(|r| r.severity == severity) {
                    Self::format_failure(&mut output, result)?;
                }
            }
        }

        writeln!(output)?;
        Ok(output)
    }

    fn format_failure(output: &mut String, result: &ValidationResult) -> Result<()> {
        writeln!(output)?;
        writeln!(
            output,
            "  ✗ [{}] {}: {}",
            result.severity, result.rule_id, result.description
        )?;
        writeln!(output, "      {}", result.details)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::sample_report;

    #[test]
    fn test_console_lists_failures_by_severity() {
        let output = ConsoleReporter::format(&sample_report()).unwrap();

        assert!(output.contains("BRD VALIDATION RESULTS"));
        assert!(output.contains("✗ INVALID"));
        assert!(output.contains("Overall Score:  50.0%"));

        let critical = output.find("[Critical] V001").unwrap();
        let low = output.find("[Low] V022").unwrap();
        assert!(critical < low);
        assert!(!output.contains("] V013"));
    }

    #[test]
    fn test_console_valid_report_has_no_failure_block() {
        let mut report = sample_report();
        for result in &mut report.results {
            result.passed = true;
        }
        report.summary.critical_failures = 0;

        let output = ConsoleReporter::format(&report).unwrap();
        assert!(output.contains("✓ VALID"));
        assert!(!output.contains("Failed Validations"));
    }
}
