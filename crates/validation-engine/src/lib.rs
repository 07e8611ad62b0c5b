//! Rule registry, validation engine and report formatting for parsed BRDs
//!
//! The engine runs every registered rule against a [`ParsedDocument`] in
//! registration order and folds the verdicts into a severity-weighted
//! [`ValidationSummary`].
//!
//! # Example
//!
//! ```
//! use validation_engine::ValidationEngine;
//!
//! let outcome = brd_parser::parse("0.1 Executive Summary\nA modernization effort", false);
//! let report = ValidationEngine::default().validate(&outcome.document);
//!
//! assert_eq!(report.results.len(), report.summary.total_rules);
//! assert!(!report.is_document_valid());
//! ```
//!
//! [`ParsedDocument`]: shared_types::ParsedDocument
//! [`ValidationSummary`]: shared_types::ValidationSummary

pub mod engine;
pub mod report;
pub mod reporter;
pub mod rules;

pub use engine::{EngineConfig, ValidationEngine};
pub use report::{DocumentStatus, ReportMetrics, ValidationReport};
pub use reporter::{OutputFormat, Reporter};
pub use rules::{Rule, RuleConfig, RuleError, RuleInfo, RuleRegistry, ValidationRule};
