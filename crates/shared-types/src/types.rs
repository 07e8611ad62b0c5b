use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One of the six canonical top-level groupings of a BRD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: u8,
    pub name: String,
    pub content: Option<String>,
    pub present: bool,
}

impl Section {
    /// A canonical section that was not found in the input
    pub fn absent(id: u8, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            content: None,
            present: false,
        }
    }
}

/// One of the eighteen canonical sub-units within a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub content: Option<String>,
    pub present: bool,
    pub fields: BTreeMap<String, Field>,
}

impl Node {
    /// A canonical node that was not found in the input
    pub fn absent(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            content: None,
            present: false,
            fields: BTreeMap::new(),
        }
    }

    /// Node text, only when the node is present
    pub fn text(&self) -> Option<&str> {
        if self.present {
            self.content.as_deref()
        } else {
            None
        }
    }
}

/// A named sub-value inside a node (description, purpose, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub content: String,
    pub description: String,
    pub purpose: String,
    pub present: bool,
    pub has_placeholder: bool,
}

impl Field {
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// How much of the canonical structure is physically present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureAnalysis {
    pub total_sections_present: usize,
    pub total_nodes_present: usize,
    /// `"<id>: <name>"` entries
    pub missing_sections: Vec<String>,
    /// `"<id>: <name>"` entries
    pub missing_nodes: Vec<String>,
    /// 0.0 ..= 100.0, one decimal
    pub completeness_percentage: f64,
}

/// Content quality metrics over present nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub total_word_count: usize,
    pub nodes_with_placeholders: Vec<String>,
    /// `"<node>.<field>"` entries
    pub empty_fields: Vec<String>,
    /// 0.0 ..= 100.0, one decimal
    pub quality_score: f64,
}

/// Canonical view of a BRD reconstructed by the parser.
///
/// Built once per run and only handed out by shared reference afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub sections: BTreeMap<u8, Section>,
    pub nodes: BTreeMap<String, Node>,
    pub structure_analysis: StructureAnalysis,
    pub content_analysis: ContentAnalysis,
}

impl ParsedDocument {
    pub fn section(&self, id: u8) -> Option<&Section> {
        self.sections.get(&id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn present_section_count(&self) -> usize {
        self.sections.values().filter(|s| s.present).count()
    }

    pub fn present_node_count(&self) -> usize {
        self.nodes.values().filter(|n| n.present).count()
    }

    /// Text of a node if it exists and is present
    pub fn node_text(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).and_then(Node::text)
    }
}

/// Condensed parse statistics for display next to the validation report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub total_sections_found: usize,
    pub total_nodes_found: usize,
    pub completeness_percentage: f64,
    pub quality_score: f64,
    pub parsing_errors: Vec<String>,
}

impl ExtractionSummary {
    pub fn new(document: &ParsedDocument, parsing_errors: &[String]) -> Self {
        Self {
            total_sections_found: document.present_section_count(),
            total_nodes_found: document.present_node_count(),
            completeness_percentage: document.structure_analysis.completeness_percentage,
            quality_score: document.content_analysis.quality_score,
            parsing_errors: parsing_errors.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_document() -> ParsedDocument {
        let mut sections = BTreeMap::new();
        sections.insert(0, Section::absent(0, "Project Foundation"));

        let mut nodes = BTreeMap::new();
        let mut summary = Node::absent("0.1", "Executive Summary & Business Case");
        summary.present = true;
        summary.content = Some("modernization of billing".to_string());
        nodes.insert("0.1".to_string(), summary);
        let mut dangling = Node::absent("0.2", "Requirements Summary Dashboard");
        dangling.content = Some("ignored".to_string());
        nodes.insert("0.2".to_string(), dangling);

        ParsedDocument {
            sections,
            nodes,
            structure_analysis: StructureAnalysis::default(),
            content_analysis: ContentAnalysis::default(),
        }
    }

    #[test]
    fn test_node_text_requires_presence() {
        let doc = sample_document();
        assert_eq!(doc.node_text("0.1"), Some("modernization of billing"));
        assert_eq!(doc.node_text("0.2"), None);
        assert_eq!(doc.node_text("4.3"), None);
    }

    #[test]
    fn test_present_counts() {
        let doc = sample_document();
        assert_eq!(doc.present_section_count(), 0);
        assert_eq!(doc.present_node_count(), 1);
    }

    #[test]
    fn test_field_emptiness() {
        let field = Field {
            content: "   \n".to_string(),
            description: String::new(),
            purpose: String::new(),
            present: true,
            has_placeholder: false,
        };
        assert!(field.is_empty());
    }

    #[test]
    fn test_section_keys_survive_json() {
        let doc = sample_document();
        let json = serde_json::to_string(&doc).unwrap();
        let back: ParsedDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
