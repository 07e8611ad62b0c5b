//! Validation outcome types shared by the engine and its consumers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity of a rule failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Ordering used when presenting failures (1 = most urgent)
    pub fn priority(self) -> u8 {
        match self {
            Severity::Critical => 1,
            Severity::High => 2,
            Severity::Medium => 3,
            Severity::Low => 4,
        }
    }

    /// Contribution to the overall score
    pub fn weight(self) -> u32 {
        match self {
            Severity::Critical => 4,
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

/// Outcome of one rule against one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub rule_id: String,
    pub description: String,
    pub severity: Severity,
    pub category: String,
    pub passed: bool,
    pub message: String,
    pub details: String,
    /// Seconds spent evaluating the rule
    pub execution_time: f64,
    /// Set when the predicate itself errored instead of returning a verdict
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn is_execution_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn status_label(&self) -> &'static str {
        if self.passed {
            "PASS"
        } else {
            "FAIL"
        }
    }
}

/// Aggregate of one validation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Rules actually executed (may be fewer than registered after a timeout)
    pub total_rules: usize,
    pub passed: usize,
    pub failed: usize,
    pub critical_failures: usize,
    pub high_failures: usize,
    pub medium_failures: usize,
    pub low_failures: usize,
    /// Severity-weighted pass percentage, 0.0 ..= 100.0
    pub overall_score: f64,
    /// Seconds for the whole run
    pub execution_time: f64,
    pub timestamp: String,
}

impl ValidationSummary {
    pub fn failures_for(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical_failures,
            Severity::High => self.high_failures,
            Severity::Medium => self.medium_failures,
            Severity::Low => self.low_failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_and_priorities() {
        let weights: Vec<u32> = Severity::ALL.iter().map(|s| s.weight()).collect();
        assert_eq!(weights, vec![4, 3, 2, 1]);

        let priorities: Vec<u8> = Severity::ALL.iter().map(|s| s.priority()).collect();
        assert_eq!(priorities, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_severity_parsing() {
        assert_eq!("critical".parse::<Severity>(), Ok(Severity::Critical));
        assert_eq!("LOW".parse::<Severity>(), Ok(Severity::Low));
        assert!("urgent".parse::<Severity>().is_err());
    }

    #[test]
    fn test_execution_error_result_omits_nothing_when_clean() {
        let result = ValidationResult {
            rule_id: "V001".to_string(),
            description: "d".to_string(),
            severity: Severity::High,
            category: "c".to_string(),
            passed: true,
            message: "Rule V001 PASSED".to_string(),
            details: String::new(),
            execution_time: 0.0,
            error: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["severity"], "High");
        assert_eq!(result.status_label(), "PASS");
    }
}
