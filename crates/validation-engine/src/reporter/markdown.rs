//! Markdown reporter: executive summary followed by failed validations

use std::fmt::Write;

use anyhow::Result;
use shared_types::Severity;

use crate::report::ValidationReport;

pub struct MarkdownReporter;

impl MarkdownReporter {
    pub fn format(report: &ValidationReport) -> Result<String> {
        let mut output = String::new();
        let summary = &report.summary;
        let metrics = report.metrics();

        writeln!(output, "# BRD Validation Executive Summary")?;
        writeln!(output)?;
        writeln!(output, "**Document Status:** {}", metrics.document_status)?;
        writeln!(output, "**Overall Score:** {:.1}%", summary.overall_score)?;
        writeln!(output, "**Validation Date:** {}", summary.timestamp)?;
        writeln!(output)?;

        writeln!(output, "## Key Metrics")?;
        writeln!(output, "- **Total Rules Evaluated:** {}", summary.total_rules)?;
        writeln!(
            output,
            "- **Rules Passed:** {} ({:.1}%)",
            summary.passed,
            share(summary.passed, summary.total_rules)
        )?;
        writeln!(
            output,
            "- **Rules Failed:** {} ({:.1}%)",
            summary.failed,
            share(summary.failed, summary.total_rules)
        )?;
        writeln!(output)?;

        writeln!(output, "## Issue Breakdown")?;
        writeln!(output, "- **Critical Issues:** {} (Must fix before approval)", summary.critical_failures)?;
        writeln!(output, "- **High Priority Issues:** {} (Should fix before implementation)", summary.high_failures)?;
        writeln!(output, "- **Medium Priority Issues:** {} (Recommended improvements)", summary.medium_failures)?;
        writeln!(output, "- **Low Priority Issues:** {} (Nice to have)", summary.low_failures)?;
        writeln!(output)?;

        writeln!(output, "## Recommendation")?;
        writeln!(output, "{}", recommendation(report))?;

        let failed = report.failed_results();
        if !failed.is_empty() {
            writeln!(output)?;
            writeln!(output, "## Failed Validations")?;
            for severity in Severity::ALL {
                let group: Vec<_> = failed.iter().filter(|r| r.severity == severity).collect();
                if group.is_empty() {
                    continue;
                }
                writeln!(output)?;
                writeln!(output, "### {} Issues", severity)?;
                writeln!(output)?;
                for result in group {
                    writeln!(output, "**{}:** {}", result.rule_id, result.description)?;
                    if !result.details.is_empty() {
                        writeln!(output, "*Details:* {}", result.details)?;
                    }
                    writeln!(output)?;
                }
            }
        }

        Ok(output)
    }
}

fn share(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

fn recommendation(report: &ValidationReport) -> String {
    let summary = &report.summary;
    if summary.critical_failures > 0 {
        format!(
            "**Document requires immediate attention.** {} critical issues must be resolved before proceeding.",
            summary.critical_failures
        )
    } else if summary.high_failures > 0 {
        format!(
            "**Document needs improvements.** Address {} high-priority issues before implementation.",
            summary.high_failures
        )
    } else if summary.medium_failures > 0 {
        format!(
            "**Document is acceptable with minor improvements.** Consider addressing {} medium-priority issues.",
            summary.medium_failures
        )
    } else {
        "**Document meets all validation criteria and is ready for implementation.**".to_string()
    }
}
