//! Structural completeness and content quality scoring

use std::collections::BTreeMap;

use shared_types::{schema, ContentAnalysis, Node, Section, StructureAnalysis};

use crate::config::ParserConfig;
use crate::text::{contains_any_term, count_words, round1};

/// Present/missing counts and the weighted completeness percentage
pub fn analyze_structure(
    sections: &BTreeMap<u8, Section>,
    nodes: &BTreeMap<String, Node>,
    config: &ParserConfig,
) -> StructureAnalysis {
    let is_section_present = |id: u8| sections.get(&id).is_some_and(|s| s.present);
    let is_node_present = |id: &str| nodes.get(id).is_some_and(|n| n.present);

    let missing_sections: Vec<String> = schema::sections()
        .filter(|(id, _)| !is_section_present(*id))
        .map(|(id, name)| format!("{}: {}", id, name))
        .collect();
    let missing_nodes: Vec<String> = schema::nodes()
        .filter(|(id, _)| !is_node_present(id))
        .map(|(id, name)| format!("{}: {}", id, name))
        .collect();

    let present_sections = schema::SECTION_COUNT - missing_sections.len();
    let present_nodes = schema::NODE_COUNT - missing_nodes.len();

    StructureAnalysis {
        total_sections_present: present_sections,
        total_nodes_present: present_nodes,
        missing_sections,
        missing_nodes,
        completeness_percentage: completeness(present_sections, present_nodes, config),
    }
}

/// `((sections/6) * section_weight + (nodes/18) * node_weight) * 100`, one decimal
pub fn completeness(present_sections: usize, present_nodes: usize, config: &ParserConfig) -> f64 {
    let section_ratio = present_sections as f64 / schema::SECTION_COUNT as f64;
    let node_ratio = present_nodes as f64 / schema::NODE_COUNT as f64;
    let raw = (section_ratio * config.section_weight + node_ratio * config.node_weight) * 100.0;
    round1(raw.clamp(0.0, 100.0))
}

/// Word count, placeholder nodes, empty fields and the penalised quality score
pub fn analyze_content(nodes: &BTreeMap<String, Node>, config: &ParserConfig) -> ContentAnalysis {
    let mut analysis = ContentAnalysis::default();
    let mut present_nodes = 0;

    for (id, _) in schema::nodes() {
        let Some(node) = nodes.get(id).filter(|n| n.present) else {
            continue;
        };
        present_nodes += 1;

        let Some(content) = node.content.as_deref().filter(|c| !c.is_empty()) else {
            continue;
        };

        analysis.total_word_count += count_words(content);

        if contains_any_term(content, &config.placeholder_terms) {
            analysis.nodes_with_placeholders.push(id.to_string());
        }

        for (field_name, field) in &node.fields {
            if field.is_empty() {
                analysis.empty_fields.push(format!("{}.{}", id, field_name));
            }
        }
    }

    analysis.quality_score = quality_score(
        present_nodes,
        analysis.nodes_with_placeholders.len(),
        analysis.empty_fields.len(),
        config,
    );
    analysis
}

/// `max(0, 100 * nodes/18 - placeholder_penalty * p - empty_field_penalty * e)`, one decimal
pub fn quality_score(
    present_nodes: usize,
    placeholder_nodes: usize,
    empty_fields: usize,
    config: &ParserConfig,
) -> f64 {
    let coverage = 100.0 * present_nodes as f64 / schema::NODE_COUNT as f64;
    let penalty = config.placeholder_penalty * placeholder_nodes as f64
        + config.empty_field_penalty * empty_fields as f64;
    round1((coverage - penalty).clamp(0.0, 100.0))
}
