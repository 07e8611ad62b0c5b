//! Scoring weights and vocabulary used by the parser analyses

use serde::{Deserialize, Serialize};

use crate::text::DEFAULT_PLACEHOLDER_TERMS;

/// Tunable constants for completeness and quality scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Share of completeness contributed by sections (default: 0.3)
    #[serde(default = "default_section_weight")]
    pub section_weight: f64,
    /// Share of completeness contributed by nodes (default: 0.7)
    #[serde(default = "default_node_weight")]
    pub node_weight: f64,
    /// Quality points lost per node containing placeholder text (default: 5)
    #[serde(default = "default_placeholder_penalty")]
    pub placeholder_penalty: f64,
    /// Quality points lost per empty field (default: 2)
    #[serde(default = "default_empty_field_penalty")]
    pub empty_field_penalty: f64,
    /// Case-insensitive terms that mark unfinished content
    #[serde(default = "default_placeholder_terms")]
    pub placeholder_terms: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            section_weight: default_section_weight(),
            node_weight: default_node_weight(),
            placeholder_penalty: default_placeholder_penalty(),
            empty_field_penalty: default_empty_field_penalty(),
            placeholder_terms: default_placeholder_terms(),
        }
    }
}

fn default_section_weight() -> f64 {
    0.3
}

fn default_node_weight() -> f64 {
    0.7
}

fn default_placeholder_penalty() -> f64 {
    5.0
}

fn default_empty_field_penalty() -> f64 {
    2.0
}

fn default_placeholder_terms() -> Vec<String> {
    DEFAULT_PLACEHOLDER_TERMS
        .iter()
        .map(|term| term.to_string())
        .collect()
}
