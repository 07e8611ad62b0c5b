//! Validation rules and the registry that orders them
//!
//! Every rule is an immutable capability: an id, a description, a severity,
//! a category and a pure predicate over a [`ParsedDocument`]. The standard
//! catalogue is grouped by the part of the document it inspects:
//!
//! - [`structural`] - section and node presence
//! - [`content`] - placeholders, word count, empty fields
//! - [`foundation`] - executive summary and requirements dashboard
//! - [`organization`] - hierarchy and role definitions
//! - [`workflow`] - business process workflows

pub mod content;
pub mod foundation;
pub mod organization;
pub mod structural;
pub mod workflow;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use shared_types::{ParsedDocument, Severity};
use thiserror::Error;
use tracing::warn;

/// Category names used by the standard catalogue
pub mod categories {
    pub const STRUCTURAL_COMPLETENESS: &str = "Structural Completeness";
    pub const CONTENT_QUALITY: &str = "Content Quality";
    pub const PROJECT_FOUNDATION: &str = "Project Foundation";
    pub const REQUIREMENTS_SUMMARY: &str = "Requirements Summary";
    pub const ORGANIZATIONAL_STRUCTURE: &str = "Organizational Structure";
    pub const BUSINESS_PROCESS_WORKFLOWS: &str = "Business Process Workflows";
}

/// A predicate could not reach a verdict
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("node {0} is missing from the parsed document")]
    MissingNode(String),

    #[error("{0}")]
    Evaluation(String),
}

/// A single check against a parsed document
pub trait ValidationRule: Send + Sync {
    fn id(&self) -> &str;

    fn description(&self) -> &str;

    fn severity(&self) -> Severity;

    fn category(&self) -> &str;

    /// Presentation order derived from severity (1 = most urgent)
    fn priority(&self) -> u8 {
        self.severity().priority()
    }

    /// `Ok(true)` when the document satisfies the rule
    fn evaluate(&self, document: &ParsedDocument) -> Result<bool, RuleError>;
}

type Predicate = Box<dyn Fn(&ParsedDocument) -> Result<bool, RuleError> + Send + Sync>;

/// Rule backed by a boxed predicate
pub struct Rule {
    id: String,
    description: String,
    severity: Severity,
    category: String,
    predicate: Predicate,
}

impl Rule {
    pub fn new<F>(
        id: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        category: impl Into<String>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&ParsedDocument) -> Result<bool, RuleError> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            description: description.into(),
            severity,
            category: category.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl ValidationRule for Rule {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn evaluate(&self, document: &ParsedDocument) -> Result<bool, RuleError> {
        (self.predicate)(document)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("severity", &self.severity)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Serializable description of a registered rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleInfo {
    pub id: String,
    pub description: String,
    pub severity: Severity,
    pub category: String,
    pub priority: u8,
}

impl RuleInfo {
    pub fn from_rule(rule: &dyn ValidationRule) -> Self {
        Self {
            id: rule.id().to_string(),
            description: rule.description().to_string(),
            severity: rule.severity(),
            category: rule.category().to_string(),
            priority: rule.priority(),
        }
    }
}

/// Thresholds and vocabulary for the standard catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Sections required by V001 (default: 5)
    #[serde(default = "default_min_sections")]
    pub min_sections: usize,
    /// Nodes required by V006 (default: 18)
    #[serde(default = "default_min_nodes")]
    pub min_nodes: usize,
    /// Total words required by V014 (default: 1000)
    #[serde(default = "default_min_word_count")]
    pub min_word_count: usize,
    /// Allowed distance from 100 for V020 (default: 0.1)
    #[serde(default = "default_percentage_tolerance")]
    pub percentage_tolerance: f64,
    /// Accepted user intent categories for V015
    #[serde(default = "default_intent_categories")]
    pub intent_categories: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            min_sections: default_min_sections(),
            min_nodes: default_min_nodes(),
            min_word_count: default_min_word_count(),
            percentage_tolerance: default_percentage_tolerance(),
            intent_categories: default_intent_categories(),
        }
    }
}

fn default_min_sections() -> usize {
    5
}

fn default_min_nodes() -> usize {
    shared_types::schema::NODE_COUNT
}

fn default_min_word_count() -> usize {
    1000
}

fn default_percentage_tolerance() -> f64 {
    0.1
}

fn default_intent_categories() -> Vec<String> {
    [
        "new build",
        "modernization",
        "AI-enablement",
        "integration",
        "UX reimagining",
        "domain-specific",
    ]
    .iter()
    .map(|category| category.to_string())
    .collect()
}

/// Ordered, immutable rule set. Share it between engines with `Arc`.
pub struct RuleRegistry {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl RuleRegistry {
    /// Standard catalogue with default thresholds
    pub fn standard() -> Self {
        Self::with_config(&RuleConfig::default())
    }

    /// Standard catalogue with custom thresholds
    pub fn with_config(config: &RuleConfig) -> Self {
        Self::builder().standard_rules(config).build()
    }

    /// Empty builder; call [`RuleRegistryBuilder::standard_rules`] to start from the catalogue
    pub fn builder() -> RuleRegistryBuilder {
        RuleRegistryBuilder::default()
    }

    pub fn get(&self, id: &str) -> Option<&dyn ValidationRule> {
        self.rules
            .iter()
            .find(|rule| rule.id() == id)
            .map(|rule| rule.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ValidationRule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules grouped by category, registration order kept inside each group
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&dyn ValidationRule>> {
        let mut groups: BTreeMap<&str, Vec<&dyn ValidationRule>> = BTreeMap::new();
        for rule in self.iter() {
            groups.entry(rule.category()).or_default().push(rule);
        }
        groups
    }

    pub fn by_severity(&self) -> BTreeMap<Severity, Vec<&dyn ValidationRule>> {
        let mut groups: BTreeMap<Severity, Vec<&dyn ValidationRule>> = BTreeMap::new();
        for rule in self.iter() {
            groups.entry(rule.severity()).or_default().push(rule);
        }
        groups
    }

    pub fn describe(&self) -> Vec<RuleInfo> {
        self.iter().map(RuleInfo::from_rule).collect()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|rule| rule.id())).finish()
    }
}

/// Collects rules before the registry is frozen
#[derive(Default)]
pub struct RuleRegistryBuilder {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl RuleRegistryBuilder {
    /// Append the standard catalogue in its canonical order
    pub fn standard_rules(mut self, config: &RuleConfig) -> Self {
        let catalogue = structural::rules(config)
            .into_iter()
            .chain(content::rules(config))
            .chain(foundation::rules(config))
            .chain(organization::rules(config))
            .chain(workflow::rules(config));
        for rule in catalogue {
            self = self.rule(rule);
        }
        self
    }

    /// Append a rule. A rule reusing an existing id replaces it in place.
    pub fn rule<R: ValidationRule + 'static>(mut self, rule: R) -> Self {
        match self.rules.iter().position(|existing| existing.id() == rule.id()) {
            Some(index) => {
                warn!(rule = rule.id(), "replacing previously registered rule");
                self.rules[index] = Box::new(rule);
            }
            None => self.rules.push(Box::new(rule)),
        }
        self
    }

    pub fn build(self) -> RuleRegistry {
        RuleRegistry { rules: self.rules }
    }
}

/// Body of a node that must exist in the document map, heading stripped.
///
/// `Ok(None)` when the node was not found in the source, `Err` when the
/// document does not carry the node at all.
pub(crate) fn present_node_text<'a>(
    document: &'a ParsedDocument,
    node_id: &str,
) -> Result<Option<&'a str>, RuleError> {
    let node = document
        .node(node_id)
        .ok_or_else(|| RuleError::MissingNode(node_id.to_string()))?;
    if !node.present {
        return Ok(None);
    }
    let text = node.content.as_deref().unwrap_or_default();
    Ok(Some(strip_heading(text, &node.name)))
}

/// Drop a leading copy of the node's own name ("Role Definitions: ...")
fn strip_heading<'a>(text: &'a str, name: &str) -> &'a str {
    match text.get(..name.len()) {
        Some(head) if !name.is_empty() && head.eq_ignore_ascii_case(name) => text[name.len()..]
            .trim_start_matches(|c: char| c == ':' || c.is_whitespace()),
        _ => text,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use brd_parser::DocumentParser;
    use shared_types::{schema, ParsedDocument};

    /// Parse free text with one `<id> <name>` heading and body per entry
    pub fn document_with_nodes(node_text: &[(&str, &str)]) -> ParsedDocument {
        let text = node_text
            .iter()
            .map(|(id, body)| {
                let name = schema::node_name(id).unwrap_or_default();
                format!("{} {}\n{}\n", id, name, body)
            })
            .collect::<Vec<_>>()
            .join("\n");
        DocumentParser::default().parse(&text, false).document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standard_registry_order() {
        let registry = RuleRegistry::standard();
        let ids: Vec<&str> = registry.iter().map(|rule| rule.id()).collect();
        assert_eq!(
            ids,
            vec!["V001", "V002", "V006", "V013", "V014", "V016", "V015", "V020", "V021", "V022", "V024"]
        );
    }

    #[test]
    fn test_rule_structure() {
        let registry = RuleRegistry::standard();
        for rule in registry.iter() {
            assert!(rule.id().starts_with('V'));
            assert!(!rule.description().is_empty());
            assert!(!rule.category().is_empty());
            assert_eq!(rule.priority(), rule.severity().priority());
        }
    }

    #[test]
    fn test_get_by_id() {
        let registry = RuleRegistry::standard();
        let rule = registry.get("V015").unwrap();
        assert_eq!(rule.severity(), Severity::High);
        assert_eq!(rule.category(), categories::PROJECT_FOUNDATION);
        assert!(registry.get("V999").is_none());
    }

    #[test]
    fn test_grouping() {
        let registry = RuleRegistry::standard();

        let by_category = registry.by_category();
        assert_eq!(by_category[categories::STRUCTURAL_COMPLETENESS].len(), 3);
        assert_eq!(by_category[categories::CONTENT_QUALITY].len(), 3);
        let grouped: usize = by_category.values().map(Vec::len).sum();
        assert_eq!(grouped, registry.len());

        let by_severity = registry.by_severity();
        assert_eq!(by_severity[&Severity::Critical].len(), 3);
        assert_eq!(by_severity[&Severity::High].len(), 2);
    }

    #[test]
    fn test_builder_extends_and_replaces() {
        let registry = RuleRegistry::builder()
            .standard_rules(&RuleConfig::default())
            .rule(Rule::new("V900", "Custom check", Severity::Low, "Custom", |_| Ok(true)))
            .rule(Rule::new("V001", "Replaced", Severity::Low, "Custom", |_| Ok(true)))
            .build();

        assert_eq!(registry.len(), 12);
        assert_eq!(registry.iter().next().unwrap().description(), "Replaced");
        assert_eq!(registry.iter().last().unwrap().id(), "V900");
    }

    #[test]
    fn test_strip_heading() {
        assert_eq!(strip_heading("Role Definitions\nRole: PM", "Role Definitions"), "Role: PM");
        assert_eq!(strip_heading("role definitions: PM", "Role Definitions"), "PM");
        assert_eq!(strip_heading("Roles are shared", "Role Definitions"), "Roles are shared");
    }

    #[test]
    fn test_rule_config_defaults_from_empty_object() {
        let config: RuleConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RuleConfig::default());
        assert_eq!(config.min_nodes, 18);
        assert_eq!(config.intent_categories.len(), 6);
    }

    #[test]
    fn test_present_node_text_distinguishes_absent_from_missing() {
        let document = test_support::document_with_nodes(&[("0.1", "Summary body")]);
        let text = present_node_text(&document, "0.1").unwrap().unwrap();
        assert_eq!(text, "Summary body");
        assert_eq!(present_node_text(&document, "0.2").unwrap(), None);
        assert!(matches!(
            present_node_text(&document, "9.9"),
            Err(RuleError::MissingNode(id)) if id == "9.9"
        ));
    }
}
