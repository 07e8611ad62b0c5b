//! Organizational structure: authority lines and role definitions

use brd_parser::TextAnalyzer;
use shared_types::schema::node_ids;
use shared_types::Severity;
use tracing::debug;

use super::{categories, present_node_text, Rule, RuleConfig};

pub fn rules(_config: &RuleConfig) -> Vec<Rule> {
    vec![
        Rule::new(
            "V021",
            "Hierarchy structure must describe reporting or approval authority",
            Severity::Medium,
            categories::ORGANIZATIONAL_STRUCTURE,
            |document| {
                let Some(text) = present_node_text(document, node_ids::HIERARCHY_STRUCTURE)? else {
                    return Ok(false);
                };
                let authority = TextAnalyzer::check_authority_structure(text);
                debug!(keywords = ?authority.found_keywords, "authority keywords");
                Ok(authority.has_hierarchy_info)
            },
        ),
        Rule::new(
            "V022",
            "Role definitions must name at least one role",
            Severity::Low,
            categories::ORGANIZATIONAL_STRUCTURE,
            |document| {
                let Some(text) = present_node_text(document, node_ids::ROLE_DEFINITIONS)? else {
                    return Ok(false);
                };
                Ok(!TextAnalyzer::extract_roles(text).is_empty())
            },
        ),
    ]
}
