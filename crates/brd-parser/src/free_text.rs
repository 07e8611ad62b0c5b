//! Free-text extraction strategy
//!
//! Sections and nodes are located with heading patterns and bounded by the
//! next heading-like token. Nothing here is a grammar: text that does not
//! look like the canonical headings simply leaves the section/node absent.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{schema, Field, Node, Section};
use tracing::debug;

use crate::config::ParserConfig;
use crate::text::contains_any_term;

/// Field name -> keyword pattern recognised inside a node
const FIELD_KEYWORDS: &[(&str, &str)] = &[
    ("description", "description"),
    ("purpose", "purpose"),
    ("requirements", "requirements?"),
    ("scope", "scope"),
    ("objectives", "objectives?"),
    ("stakeholders", "stakeholders?"),
    ("metrics", "metrics?"),
    ("kpis", "kpis?"),
];

lazy_static! {
    /// Ends a section opened with "Section <n>" or its name
    static ref SECTION_KEYWORD_BOUNDARY: Regex = Regex::new(r"(?i)section\s+\d+").unwrap();

    /// Ends a section opened with "<n>. <Name>"
    static ref NUMBERED_HEADING_BOUNDARY: Regex = Regex::new(r"\d+[.\s]+\w+").unwrap();

    /// Ends a node: the next "<int>.<int>" token
    static ref NODE_BOUNDARY: Regex = Regex::new(r"\d+\.\d+").unwrap();

    /// Section id -> heading patterns, tried in order
    static ref SECTION_PATTERNS: BTreeMap<u8, [(Regex, &'static Regex); 2]> = schema::sections()
        .map(|(id, name)| {
            let name = regex::escape(name);
            let patterns = [
                (
                    Regex::new(&format!(r"(?i)(?:section\s+{id}\b|{name})[:\s]+")).unwrap(),
                    &*SECTION_KEYWORD_BOUNDARY,
                ),
                (
                    Regex::new(&format!(r"(?i)\b{id}[.\s]+{name}[:\s]+")).unwrap(),
                    &*NUMBERED_HEADING_BOUNDARY,
                ),
            ];
            (id, patterns)
        })
        .collect();

    /// Node id -> start pattern. The id must not be the tail or head of a
    /// longer number ("10.1", "0.15").
    static ref NODE_PATTERNS: BTreeMap<&'static str, Regex> = schema::nodes()
        .map(|(id, _)| {
            let pattern = format!(r"(?:^|[^\w.]){}\b[.\s]*", regex::escape(id));
            (id, Regex::new(&pattern).unwrap())
        })
        .collect();

    /// A field header is its keyword followed by a colon or whitespace
    static ref FIELD_PATTERNS: Vec<(&'static str, Regex)> = FIELD_KEYWORDS
        .iter()
        .map(|(name, keyword)| {
            (*name, Regex::new(&format!(r"(?i)\b{}[:\s]+", keyword)).unwrap())
        })
        .collect();

    /// Any recognised field keyword; ends the value of the previous field
    static ref FIELD_BOUNDARY: Regex = {
        let alternatives = FIELD_KEYWORDS
            .iter()
            .map(|(_, keyword)| *keyword)
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives)).unwrap()
    };
}

/// Extract canonical sections and nodes from raw text
pub(crate) fn extract(
    text: &str,
    config: &ParserConfig,
) -> (BTreeMap<u8, Section>, BTreeMap<String, Node>) {
    let mut sections = BTreeMap::new();
    for (id, name) in schema::sections() {
        let content = find_section_content(text, id);

        sections.insert(
            id,
            Section {
                id,
                name: name.to_string(),
                present: content.is_some(),
                content,
            },
        );
    }

    let mut nodes = BTreeMap::new();
    for (id, name) in schema::nodes() {
        let content = find_node_content(text, id);

        let fields = content
            .as_deref()
            .map(|body| extract_fields(body, &config.placeholder_terms))
            .unwrap_or_default();

        if let Some(body) = &content {
            debug!(node = id, chars = body.len(), fields = fields.len(), "node located");
        }

        nodes.insert(
            id.to_string(),
            Node {
                id: id.to_string(),
                name: name.to_string(),
                present: content.is_some(),
                content,
                fields,
            },
        );
    }

    (sections, nodes)
}

/// Body of a section, `None` when no pattern matched.
///
/// The first pattern yielding a non-empty body wins. A heading with an
/// empty body still marks the section present.
fn find_section_content(text: &str, id: u8) -> Option<String> {
    let patterns = SECTION_PATTERNS.get(&id)?;

    let mut found = None;
    for (start, boundary) in patterns {
        if let Some(body) = bounded(text, start, boundary) {
            if !body.is_empty() {
                return Some(body);
            }
            found.get_or_insert(body);
        }
    }
    found
}

/// Text after the node id up to the next `<int>.<int>` token
fn find_node_content(text: &str, node_id: &str) -> Option<String> {
    bounded(text, NODE_PATTERNS.get(node_id)?, &NODE_BOUNDARY)
}

/// Trimmed text between the first `start` match and the following `boundary`
fn bounded(text: &str, start: &Regex, boundary: &Regex) -> Option<String> {
    let header = start.find(text)?;
    let rest = &text[header.end()..];
    let end = boundary.find(rest).map(|m| m.start()).unwrap_or(rest.len());
    Some(rest[..end].trim().to_string())
}

/// Apply the field dictionary to a node's text
pub fn extract_fields<S: AsRef<str>>(text: &str, placeholder_terms: &[S]) -> BTreeMap<String, Field> {
    let mut fields = BTreeMap::new();

    for (name, pattern) in FIELD_PATTERNS.iter() {
        if let Some(content) = bounded(text, pattern, &FIELD_BOUNDARY) {
            let has_placeholder = contains_any_term(&content, placeholder_terms);
            fields.insert(
                name.to_string(),
                Field {
                    description: content.clone(),
                    purpose: String::new(),
                    present: true,
                    has_placeholder,
                    content,
                },
            );
        }
    }

    fields
}
