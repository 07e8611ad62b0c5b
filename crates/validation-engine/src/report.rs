//! Results of one validation run and the queries callers make over them

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use shared_types::{Severity, ValidationResult, ValidationSummary};

use brd_parser::text::round1;

/// Per-rule results in execution order plus their summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub results: Vec<ValidationResult>,
    pub summary: ValidationSummary,
}

impl ValidationReport {
    pub fn into_parts(self) -> (Vec<ValidationResult>, ValidationSummary) {
        (self.results, self.summary)
    }

    /// No Critical rule failed among the executed rules
    pub fn is_document_valid(&self) -> bool {
        !self
            .results
            .iter()
            .any(|r| !r.passed && r.severity == Severity::Critical)
    }

    /// Results grouped by severity; every severity has an entry
    pub fn results_by_severity(&self) -> BTreeMap<Severity, Vec<&ValidationResult>> {
        let mut groups: BTreeMap<Severity, Vec<&ValidationResult>> =
            Severity::ALL.iter().map(|s| (*s, Vec::new())).collect();
        for result in &self.results {
            groups.entry(result.severity).or_default().push(result);
        }
        groups
    }

    pub fn results_by_category(&self) -> BTreeMap<&str, Vec<&ValidationResult>> {
        let mut groups: BTreeMap<&str, Vec<&ValidationResult>> = BTreeMap::new();
        for result in &self.results {
            groups.entry(result.category.as_str()).or_default().push(result);
        }
        groups
    }

    pub fn failed_results(&self) -> Vec<&ValidationResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }

    pub fn metrics(&self) -> ReportMetrics {
        ReportMetrics::from_summary(&self.summary)
    }
}

/// Headline figures shown above a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetrics {
    pub overall_score: f64,
    /// Percentage of executed rules that passed
    pub pass_rate: f64,
    pub critical_issues: usize,
    pub total_issues: usize,
    /// Seconds
    pub validation_time: f64,
    pub document_status: DocumentStatus,
}

impl ReportMetrics {
    pub fn from_summary(summary: &ValidationSummary) -> Self {
        let pass_rate = if summary.total_rules > 0 {
            round1(summary.passed as f64 / summary.total_rules as f64 * 100.0)
        } else {
            0.0
        };

        Self {
            overall_score: summary.overall_score,
            pass_rate,
            critical_issues: summary.critical_failures,
            total_issues: summary.failed,
            validation_time: summary.execution_time,
            document_status: DocumentStatus::from_critical_failures(summary.critical_failures),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentStatus {
    Valid,
    Invalid,
}

impl DocumentStatus {
    pub fn from_critical_failures(critical_failures: usize) -> Self {
        if critical_failures == 0 {
            DocumentStatus::Valid
        } else {
            DocumentStatus::Invalid
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Valid => "VALID",
            DocumentStatus::Invalid => "INVALID",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
