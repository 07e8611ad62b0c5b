//! Rule execution and aggregation
//!
//! Rules run one after another in registry order. The time budget is
//! cooperative: it is checked before each rule, so a rule that is already
//! running is never interrupted and may overrun the budget.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use shared_types::{ParsedDocument, Severity, ValidationResult, ValidationSummary};
use tracing::{debug, info, warn};

use crate::report::ValidationReport;
use crate::rules::{categories, RuleRegistry, ValidationRule};

const MAX_MISSING_LISTED: usize = 5;
const MAX_CONTENT_ISSUES_LISTED: usize = 3;
const NO_DETAILS: &str = "No additional details available";

/// Engine tuning loaded from the `[engine]` config table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Wall-clock budget for a whole run in milliseconds (default: 300000)
    #[serde(default = "default_time_budget_ms")]
    pub time_budget_ms: u64,
}

impl EngineConfig {
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: default_time_budget_ms(),
        }
    }
}

fn default_time_budget_ms() -> u64 {
    300_000
}

/// Runs a shared rule registry against parsed documents
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    registry: Arc<RuleRegistry>,
    config: EngineConfig,
}

impl ValidationEngine {
    pub fn new(registry: Arc<RuleRegistry>, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate every rule that fits in the time budget
    pub fn validate(&self, document: &ParsedDocument) -> ValidationReport {
        let started = Instant::now();
        let budget = self.config.time_budget();
        info!(rules = self.registry.len(), "Starting validation");

        let mut results = Vec::with_capacity(self.registry.len());
        for rule in self.registry.iter() {
            if started.elapsed() > budget {
                warn!(
                    budget_ms = self.config.time_budget_ms,
                    executed = results.len(),
                    skipped = self.registry.len() - results.len(),
                    "Validation time budget exhausted"
                );
                break;
            }
            results.push(execute_rule(rule, document));
        }

        let summary = summarize(&results, started.elapsed());
        info!(
            passed = summary.passed,
            failed = summary.failed,
            score = summary.overall_score,
            "Validation completed in {:.2} seconds",
            summary.execution_time
        );

        ValidationReport { results, summary }
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new(Arc::new(RuleRegistry::standard()), EngineConfig::default())
    }
}

/// Evaluate one rule, turning a predicate error into a failed result
pub fn execute_rule(rule: &dyn ValidationRule, document: &ParsedDocument) -> ValidationResult {
    let started = Instant::now();

    let (passed, message, details, error) = match rule.evaluate(document) {
        Ok(passed) => {
            let verdict = if passed { "PASSED" } else { "FAILED" };
            (
                passed,
                format!("Rule {} {}", rule.id(), verdict),
                rule_details(rule.category(), document, passed),
                None,
            )
        }
        Err(err) => {
            warn!(rule = rule.id(), error = %err, "rule execution failed");
            (
                false,
                format!("Rule {} FAILED - Execution Error", rule.id()),
                format!("Error executing validation: {}", err),
                Some(err.to_string()),
            )
        }
    };

    let execution_time = started.elapsed().as_secs_f64();
    debug!(rule = rule.id(), passed, execution_time, "rule evaluated");

    ValidationResult {
        rule_id: rule.id().to_string(),
        description: rule.description().to_string(),
        severity: rule.severity(),
        category: rule.category().to_string(),
        passed,
        message,
        details,
        execution_time,
        error,
    }
}

/// Context appended to a result, chosen by the rule's category
fn rule_details(category: &str, document: &ParsedDocument, passed: bool) -> String {
    let mut parts = Vec::new();

    match category {
        categories::STRUCTURAL_COMPLETENESS => {
            let structure = &document.structure_analysis;
            parts.push(format!("Sections found: {}", structure.total_sections_present));
            parts.push(format!("Nodes found: {}", structure.total_nodes_present));

            if !passed {
                if !structure.missing_sections.is_empty() {
                    parts.push(format!(
                        "Missing sections: {}",
                        head_list(&structure.missing_sections, MAX_MISSING_LISTED)
                    ));
                }
                if !structure.missing_nodes.is_empty() {
                    parts.push(format!(
                        "Missing nodes: {}",
                        head_list(&structure.missing_nodes, MAX_MISSING_LISTED)
                    ));
                }
            }
        }
        categories::CONTENT_QUALITY => {
            let content = &document.content_analysis;
            parts.push(format!("Quality score: {}%", content.quality_score));
            parts.push(format!("Total words: {}", content.total_word_count));

            if !passed {
                if !content.nodes_with_placeholders.is_empty() {
                    parts.push(format!(
                        "Nodes with placeholders: {}",
                        head_list(&content.nodes_with_placeholders, MAX_CONTENT_ISSUES_LISTED)
                    ));
                }
                if !content.empty_fields.is_empty() {
                    parts.push(format!(
                        "Empty fields: {}",
                        head_list(&content.empty_fields, MAX_CONTENT_ISSUES_LISTED)
                    ));
                }
            }
        }
        categories::PROJECT_FOUNDATION => {
            let found = document
                .node(shared_types::schema::node_ids::EXECUTIVE_SUMMARY)
                .is_some_and(|node| node.present);
            parts.push(if found {
                "Executive Summary section found".to_string()
            } else {
                "Executive Summary section missing".to_string()
            });
        }
        _ => {}
    }

    if parts.is_empty() {
        NO_DETAILS.to_string()
    } else {
        parts.join(" | ")
    }
}

/// First `limit` items joined with ", ", with "..." when truncated
fn head_list(items: &[String], limit: usize) -> String {
    let shown = items[..items.len().min(limit)].join(", ");
    if items.len() > limit {
        format!("{}...", shown)
    } else {
        shown
    }
}

/// Aggregate executed results into a summary
pub fn summarize(results: &[ValidationResult], elapsed: Duration) -> ValidationSummary {
    let failures = |severity: Severity| {
        results
            .iter()
            .filter(|r| !r.passed && r.severity == severity)
            .count()
    };
    let passed = results.iter().filter(|r| r.passed).count();

    ValidationSummary {
        total_rules: results.len(),
        passed,
        failed: results.len() - passed,
        critical_failures: failures(Severity::Critical),
        high_failures: failures(Severity::High),
        medium_failures: failures(Severity::Medium),
        low_failures: failures(Severity::Low),
        overall_score: overall_score(results),
        execution_time: (elapsed.as_secs_f64() * 100.0).round() / 100.0,
        timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

/// Severity-weighted pass percentage, one decimal; 0 when nothing ran
pub fn overall_score(results: &[ValidationResult]) -> f64 {
    let possible: u32 = results.iter().map(|r| r.severity.weight()).sum();
    if possible == 0 {
        return 0.0;
    }
    let earned: u32 = results
        .iter()
        .filter(|r| r.passed)
        .map(|r| r.severity.weight())
        .sum();
    brd_parser::text::round1(f64::from(earned) / f64::from(possible) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Rule, RuleError};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use shared_types::schema;

    fn full_text() -> String {
        let mut text = String::new();
        for (id, name) in schema::sections() {
            text.push_str(&format!("Section {}: {}\n", id, name));
        }
        let filler = "The operations team reviews every customer request carefully. ".repeat(10);
        for (id, name) in schema::nodes() {
            let body = match id {
                "0.1" => "user_intent_category: modernization of the core ledger".to_string(),
                "0.2" => "Core Functions: 60%, Support Functions: 25%, Analytics: 15%".to_string(),
                "1.1" => "Each analyst reports to the finance director".to_string(),
                "1.2" => "Role: Project Manager".to_string(),
                "4.1" => "The Invoice Approval Process routes bills to finance".to_string(),
                _ => filler.clone(),
            };
            text.push_str(&format!("{} {}\n{}\n", id, name, body));
        }
        text
    }

    fn results_with(severities_and_verdicts: &[(Severity, bool)]) -> Vec<ValidationResult> {
        severities_and_verdicts
            .iter()
            .enumerate()
            .map(|(i, (severity, passed))| ValidationResult {
                rule_id: format!("T{:03}", i),
                description: "test".to_string(),
                severity: *severity,
                category: "Test".to_string(),
                passed: *passed,
                message: String::new(),
                details: String::new(),
                execution_time: 0.0,
                error: None,
            })
            .collect()
    }

    #[test]
    fn test_complete_document_is_valid() {
        let document = brd_parser::parse(&full_text(), false).document;
        assert_eq!(document.structure_analysis.completeness_percentage, 100.0);

        let report = ValidationEngine::default().validate(&document);
        let failed: Vec<&str> = report
            .failed_results()
            .iter()
            .map(|r| r.rule_id.as_str())
            .collect();

        assert!(failed.is_empty(), "unexpected failures: {:?}", failed);
        assert!(report.is_document_valid());
        assert_eq!(report.summary.overall_score, 100.0);
    }

    #[test]
    fn test_empty_document_runs_every_rule() {
        let document = brd_parser::parse("", false).document;
        let engine = ValidationEngine::default();
        let report = engine.validate(&document);

        assert_eq!(report.results.len(), engine.registry().len());
        assert_eq!(report.summary.total_rules, engine.registry().len());
        assert_eq!(report.summary.critical_failures, 3);
        assert!(!report.is_document_valid());
        assert!(report.results.iter().all(|r| r.error.is_none()));
    }

    #[test]
    fn test_structural_details_list_missing_entries() {
        let document = brd_parser::parse("0.1 Executive Summary\nmodernization", false).document;
        let report = ValidationEngine::default().validate(&document);
        let v001 = report.results.iter().find(|r| r.rule_id == "V001").unwrap();

        assert_eq!(v001.message, "Rule V001 FAILED");
        assert!(v001.details.starts_with("Sections found: 0 | Nodes found: 1"));
        assert!(v001.details.contains(
            "Missing sections: 0: Project Foundation, 1: Organizational Structure, \
             2: Data & Entity Management, 3: Functions & Operations, 4: Business Process Workflows..."
        ));
        assert!(v001.details.contains("Missing nodes: 0.2: Requirements Summary Dashboard"));
    }

    #[test]
    fn test_category_details() {
        let document = brd_parser::parse("0.1 Executive Summary\nBudget TBD", false).document;
        let report = ValidationEngine::default().validate(&document);
        let detail = |id: &str| {
            report
                .results
                .iter()
                .find(|r| r.rule_id == id)
                .map(|r| r.details.clone())
                .unwrap()
        };

        assert_eq!(
            detail("V013"),
            "Quality score: 0.6% | Total words: 4 | Nodes with placeholders: 0.1"
        );
        assert_eq!(detail("V015"), "Executive Summary section found");
        assert_eq!(detail("V020"), NO_DETAILS);
    }

    #[test]
    fn test_erroring_rule_is_isolated() {
        let registry = RuleRegistry::builder()
            .rule(Rule::new("T001", "passes", Severity::Low, "Test", |_| Ok(true)))
            .rule(Rule::new("T002", "breaks", Severity::High, "Test", |_| {
                Err(RuleError::Evaluation("lookup table unavailable".to_string()))
            }))
            .rule(Rule::new("T003", "passes", Severity::Low, "Test", |_| Ok(true)))
            .build();
        let engine = ValidationEngine::new(Arc::new(registry), EngineConfig::default());
        let report = engine.validate(&brd_parser::parse("", false).document);

        assert_eq!(report.results.len(), 3);
        let errored: Vec<&ValidationResult> =
            report.results.iter().filter(|r| r.is_execution_error()).collect();
        assert_eq!(errored.len(), 1);

        let broken = errored[0];
        assert_eq!(broken.rule_id, "T002");
        assert!(!broken.passed);
        assert_eq!(broken.message, "Rule T002 FAILED - Execution Error");
        assert_eq!(
            broken.details,
            "Error executing validation: lookup table unavailable"
        );
        assert_eq!(report.summary.passed, 2);
        assert_eq!(report.summary.high_failures, 1);
    }

    #[test]
    fn test_time_budget_skips_remaining_rules() {
        let registry = RuleRegistry::builder()
            .rule(Rule::new("T001", "slow", Severity::Low, "Test", |_| {
                std::thread::sleep(Duration::from_millis(100));
                Ok(true)
            }))
            .rule(Rule::new("T002", "never reached", Severity::Critical, "Test", |_| Ok(false)))
            .build();
        let engine = ValidationEngine::new(Arc::new(registry), EngineConfig { time_budget_ms: 50 });
        let report = engine.validate(&brd_parser::parse("", false).document);

        assert_eq!(report.results.len(), 1);
        assert_eq!(report.summary.total_rules, 1);
        assert_eq!(report.summary.critical_failures, 0);
        assert!(report.is_document_valid());
    }

    #[test]
    fn test_overall_score_weights() {
        // Critical passes (4), High fails (3), Medium passes (2), Low fails (1): 6/10
        let results = results_with(&[
            (Severity::Critical, true),
            (Severity::High, false),
            (Severity::Medium, true),
            (Severity::Low, false),
        ]);
        assert_eq!(overall_score(&results), 60.0);
        assert_eq!(overall_score(&[]), 0.0);
    }

    #[test]
    fn test_head_list_truncates() {
        let items: Vec<String> = (1..=4).map(|i| i.to_string()).collect();
        assert_eq!(head_list(&items, 3), "1, 2, 3...");
        assert_eq!(head_list(&items[..2], 3), "1, 2");
    }

    fn severity() -> impl Strategy<Value = Severity> {
        prop_oneof![
            Just(Severity::Critical),
            Just(Severity::High),
            Just(Severity::Medium),
            Just(Severity::Low),
        ]
    }

    proptest! {
        #[test]
        fn summary_counts_are_consistent(verdicts in prop::collection::vec((severity(), any::<bool>()), 0..40)) {
            let results = results_with(&verdicts);
            let summary = summarize(&results, Duration::from_millis(3));

            prop_assert_eq!(summary.passed + summary.failed, summary.total_rules);
            let by_severity: usize = Severity::ALL.iter().map(|s| summary.failures_for(*s)).sum();
            prop_assert_eq!(by_severity, summary.failed);
            prop_assert!((0.0..=100.0).contains(&summary.overall_score));
            prop_assert_eq!(summary.overall_score, overall_score(&results));
        }
    }
}
