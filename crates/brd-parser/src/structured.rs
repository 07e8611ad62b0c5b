//! Structured (JSON payload) extraction strategy
//!
//! A section is present iff `section_<id>` exists; a node is present iff
//! `node_<a>_<b>` exists, either at the top level or inside the object of the
//! section it belongs to.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use shared_types::{schema, Field, Node, Section};
use tracing::debug;

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::text::contains_any_term;

/// Extract canonical sections and nodes from a JSON payload
pub(crate) fn extract(
    payload: &Value,
    config: &ParserConfig,
    errors: &mut Vec<ParseError>,
) -> (BTreeMap<u8, Section>, BTreeMap<String, Node>) {
    let empty = Map::new();
    let data = match payload {
        Value::Object(map) => map,
        other => {
            errors.push(ParseError::NotAnObject(value_kind(other)));
            &empty
        }
    };

    let sections = schema::sections()
        .map(|(id, name)| {
            let section = match data.get(&schema::section_key(id)) {
                Some(value) => Section {
                    id,
                    name: name.to_string(),
                    content: Some(render_text(value)),
                    present: true,
                },
                None => Section::absent(id, name),
            };
            (id, section)
        })
        .collect();

    let nodes = schema::nodes()
        .map(|(id, name)| {
            let node = match lookup_node(data, id) {
                Some(value) => {
                    let fields = extract_fields(value, &config.placeholder_terms);
                    debug!(node = id, fields = fields.len(), "node present in payload");
                    Node {
                        id: id.to_string(),
                        name: name.to_string(),
                        content: Some(render_text(value)),
                        present: true,
                        fields,
                    }
                }
                None => Node::absent(id, name),
            };
            (id.to_string(), node)
        })
        .collect();

    (sections, nodes)
}

fn lookup_node<'a>(data: &'a Map<String, Value>, id: &str) -> Option<&'a Value> {
    let key = schema::node_key(id);
    if let Some(value) = data.get(&key) {
        return Some(value);
    }

    let section = schema::node_section(id)?;
    data.get(&schema::section_key(section))?
        .as_object()?
        .get(&key)
}

/// Flatten one level of a node object into fields
fn extract_fields<S: AsRef<str>>(node_data: &Value, placeholder_terms: &[S]) -> BTreeMap<String, Field> {
    let Some(entries) = node_data.as_object() else {
        return BTreeMap::new();
    };

    entries
        .iter()
        .map(|(key, value)| {
            let content = render_text(value);
            let (description, purpose) = match value {
                Value::Object(nested) => (
                    nested.get("description").map(render_text).unwrap_or_default(),
                    nested.get("purpose").map(render_text).unwrap_or_default(),
                ),
                _ => (content.clone(), String::new()),
            };

            let field = Field {
                has_placeholder: contains_any_term(&content, placeholder_terms),
                content,
                description,
                purpose,
                present: true,
            };
            (key.clone(), field)
        })
        .collect()
}

/// Plain-text rendering of a JSON value, used for word counts and matching
pub fn render_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(render_text)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| format!("{}: {}", key, render_text(value)))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
