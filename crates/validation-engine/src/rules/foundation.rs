//! Project foundation: executive summary intent and the requirements dashboard

use brd_parser::text::{extract_percentages, validate_percentage_sum};
use shared_types::schema::node_ids;
use shared_types::Severity;

use super::{categories, present_node_text, Rule, RuleConfig};

pub fn rules(config: &RuleConfig) -> Vec<Rule> {
    let intent_categories: Vec<String> = config
        .intent_categories
        .iter()
        .map(|category| category.to_lowercase())
        .collect();
    let tolerance = config.percentage_tolerance;

    vec![
        Rule::new(
            "V015",
            "user_intent_category must be one of predefined values",
            Severity::High,
            categories::PROJECT_FOUNDATION,
            move |document| {
                let Some(text) = present_node_text(document, node_ids::EXECUTIVE_SUMMARY)? else {
                    return Ok(false);
                };
                Ok(mentions_intent_category(text, &intent_categories))
            },
        ),
        Rule::new(
            "V020",
            "function_coverage_stats percentages must add up to 100%",
            Severity::Medium,
            categories::REQUIREMENTS_SUMMARY,
            move |document| {
                let Some(text) = present_node_text(document, node_ids::REQUIREMENTS_SUMMARY)? else {
                    return Ok(false);
                };
                Ok(percentages_balance(text, tolerance))
            },
        ),
    ]
}

/// Case-insensitive match against lowercased category names
fn mentions_intent_category(text: &str, lowercase_categories: &[String]) -> bool {
    let text = text.to_lowercase();
    lowercase_categories
        .iter()
        .any(|category| text.contains(category.as_str()))
}

/// Text without percentages passes; otherwise they must total 100
fn percentages_balance(text: &str, tolerance: f64) -> bool {
    let percentages = extract_percentages(text);
    percentages.is_empty() || validate_percentage_sum(&percentages, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::document_with_nodes;
    use crate::rules::ValidationRule;

    fn evaluate(id: &str, document: &shared_types::ParsedDocument) -> bool {
        rules(&RuleConfig::default())
            .iter()
            .find(|rule| rule.id() == id)
            .unwrap()
            .evaluate(document)
            .unwrap()
    }

    #[test]
    fn test_percentage_sum_balanced() {
        let document = document_with_nodes(&[(
            "0.2",
            "function_coverage_stats: Core Functions: 60%, Support Functions: 25%, Analytics: 15%",
        )]);
        assert!(evaluate("V020", &document));
    }

    #[test]
    fn test_percentage_sum_unbalanced() {
        let document = document_with_nodes(&[(
            "0.2",
            "function_coverage_stats: Core Functions: 70%, Support Functions: 20%, Analytics: 20%",
        )]);
        assert!(!evaluate("V020", &document));
    }

    #[test]
    fn test_no_percentages_passes_but_absent_node_fails() {
        let document = document_with_nodes(&[("0.2", "Coverage is tracked weekly")]);
        assert!(evaluate("V020", &document));

        let document = document_with_nodes(&[("0.1", "modernization")]);
        assert!(!evaluate("V020", &document));
    }

    #[test]
    fn test_intent_category_matching_ignores_case() {
        let document = document_with_nodes(&[("0.1", "user_intent_category: AI-Enablement")]);
        assert!(evaluate("V015", &document));

        let document = document_with_nodes(&[("0.1", "We plan a UX REIMAGINING of the portal")]);
        assert!(evaluate("V015", &document));

        let document = document_with_nodes(&[("0.1", "user_intent_category: replatforming")]);
        assert!(!evaluate("V015", &document));
    }

    #[test]
    fn test_missing_executive_summary_fails() {
        let document = document_with_nodes(&[("1.1", "The CTO manages engineering")]);
        assert!(!evaluate("V015", &document));
    }

    #[test]
    fn test_node_missing_from_document_is_an_error() {
        let mut document = document_with_nodes(&[]);
        document.nodes.remove(node_ids::EXECUTIVE_SUMMARY);

        let rules = rules(&RuleConfig::default());
        let error = rules[0].evaluate(&document).unwrap_err();
        assert_eq!(error.to_string(), "node 0.1 is missing from the parsed document");
    }
}
