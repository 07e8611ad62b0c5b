//! Business process workflows

use brd_parser::TextAnalyzer;
use shared_types::schema::node_ids;
use shared_types::Severity;

use super::{categories, present_node_text, Rule, RuleConfig};

pub fn rules(_config: &RuleConfig) -> Vec<Rule> {
    vec![Rule::new(
        "V024",
        "Workflow assembly must name at least one business process",
        Severity::Low,
        categories::BUSINESS_PROCESS_WORKFLOWS,
        |document| {
            let Some(text) = present_node_text(document, node_ids::WORKFLOW_ASSEMBLY)? else {
                return Ok(false);
            };
            Ok(!TextAnalyzer::extract_processes(text).is_empty())
        },
    )]
}
