//! Structural completeness: are the canonical sections and nodes there at all

use shared_types::{schema, Severity};

use super::{categories, Rule, RuleConfig};

pub fn rules(config: &RuleConfig) -> Vec<Rule> {
    let min_sections = config.min_sections;
    let min_nodes = config.min_nodes;

    vec![
        Rule::new(
            "V001",
            format!("At least {} main sections must be present", min_sections),
            Severity::Critical,
            categories::STRUCTURAL_COMPLETENESS,
            move |document| Ok(document.present_section_count() >= min_sections),
        ),
        Rule::new(
            "V002",
            "Each section must contain all required nodes",
            Severity::Critical,
            categories::STRUCTURAL_COMPLETENESS,
            |document| {
                Ok(schema::nodes().all(|(id, _)| document.node(id).is_some_and(|node| node.present)))
            },
        ),
        Rule::new(
            "V006",
            format!("All {} nodes must be present and populated", min_nodes),
            Severity::Critical,
            categories::STRUCTURAL_COMPLETENESS,
            move |document| Ok(document.present_node_count() >= min_nodes),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::document_with_nodes;
    use crate::rules::ValidationRule;

    fn rule(id: &str) -> Rule {
        rules(&RuleConfig::default())
            .into_iter()
            .find(|rule| rule.id() == id)
            .unwrap()
    }

    fn full_document() -> shared_types::ParsedDocument {
        let bodies: Vec<(&str, &str)> = schema::nodes().map(|(id, _)| (id, "described")).collect();
        document_with_nodes(&bodies)
    }

    #[test]
    fn test_sections_threshold() {
        let empty = document_with_nodes(&[]);
        assert!(!rule("V001").evaluate(&empty).unwrap());

        let text = "Section 0: Project Foundation\nSection 1: Organizational Structure\n\
                    Section 2: Data & Entity Management\nSection 3: Functions & Operations\n\
                    Section 4: Business Process Workflows";
        let document = brd_parser::parse(text, false).document;
        assert_eq!(document.present_section_count(), 5);
        assert!(rule("V001").evaluate(&document).unwrap());
    }

    #[test]
    fn test_all_nodes_present() {
        let document = full_document();
        assert!(rule("V002").evaluate(&document).unwrap());
        assert!(rule("V006").evaluate(&document).unwrap());
    }

    #[test]
    fn test_one_missing_node_fails() {
        let bodies: Vec<(&str, &str)> = schema::nodes()
            .filter(|(id, _)| *id != "3.3")
            .map(|(id, _)| (id, "described"))
            .collect();
        let document = document_with_nodes(&bodies);

        assert!(!rule("V002").evaluate(&document).unwrap());
        assert!(!rule("V006").evaluate(&document).unwrap());
    }

    #[test]
    fn test_custom_thresholds() {
        let config = RuleConfig {
            min_sections: 0,
            min_nodes: 1,
            ..RuleConfig::default()
        };
        let rules = rules(&config);
        let document = document_with_nodes(&[("2.1", "Customer, Order")]);

        assert!(rules[0].evaluate(&document).unwrap());
        assert!(rules[2].evaluate(&document).unwrap());
        assert!(rules[2].description().contains("1 nodes"));
    }
}
