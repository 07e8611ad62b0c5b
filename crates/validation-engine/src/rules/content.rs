//! Content quality checks over the parser's content analysis

use shared_types::Severity;

use super::{categories, Rule, RuleConfig};

pub fn rules(config: &RuleConfig) -> Vec<Rule> {
    let min_word_count = config.min_word_count;

    vec![
        Rule::new(
            "V013",
            "No placeholder text (e.g., \"TBD\", \"TODO\") allowed in production",
            Severity::High,
            categories::CONTENT_QUALITY,
            |document| Ok(document.content_analysis.nodes_with_placeholders.is_empty()),
        ),
        Rule::new(
            "V014",
            format!("Document must contain at least {} words", min_word_count),
            Severity::Medium,
            categories::CONTENT_QUALITY,
            move |document| Ok(document.content_analysis.total_word_count >= min_word_count),
        ),
        Rule::new(
            "V016",
            "Recognised fields must not be left empty",
            Severity::Low,
            categories::CONTENT_QUALITY,
            |document| Ok(document.content_analysis.empty_fields.is_empty()),
        ),
    ]
}
