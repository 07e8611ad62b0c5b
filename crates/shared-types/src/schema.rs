//! Canonical BRD framework structure
//!
//! Six top-level sections (ids 0-5) and eighteen nodes addressed as
//! `"<section>.<sequence>"`. The catalogue is fixed; parsers and rules only
//! ever refer to ids listed here.

/// Number of canonical sections
pub const SECTION_COUNT: usize = 6;

/// Number of canonical nodes
pub const NODE_COUNT: usize = 18;

/// Section id -> display name, in canonical order
pub const SECTIONS: [(u8, &str); SECTION_COUNT] = [
    (0, "Project Foundation"),
    (1, "Organizational Structure"),
    (2, "Data & Entity Management"),
    (3, "Functions & Operations"),
    (4, "Business Process Workflows"),
    (5, "Intelligence & Analytics"),
];

/// Node id -> display name, in canonical order
pub const NODES: [(&str, &str); NODE_COUNT] = [
    ("0.1", "Executive Summary & Business Case"),
    ("0.2", "Requirements Summary Dashboard"),
    ("0.3", "Discovery Metadata & Quality"),
    ("1.1", "Hierarchy & Authority Structure"),
    ("1.2", "Role Definitions"),
    ("1.3", "Department Structure"),
    ("1.4", "Performance Management"),
    ("2.1", "Entity Management"),
    ("2.2", "Entity Relationships"),
    ("2.3", "Business Rules"),
    ("2.4", "Data Flow Patterns"),
    ("3.1", "Function Discovery"),
    ("3.2", "Input-Process-Output Specifications"),
    ("3.3", "Function Validation"),
    ("3.4", "Function Integration"),
    ("4.1", "Workflow Assembly"),
    ("4.2", "Data Flow Validation"),
    ("4.3", "Workflow Logic"),
];

/// Node ids with a fixed meaning for the standard rules
pub mod node_ids {
    pub const EXECUTIVE_SUMMARY: &str = "0.1";
    pub const REQUIREMENTS_SUMMARY: &str = "0.2";
    pub const HIERARCHY_STRUCTURE: &str = "1.1";
    pub const ROLE_DEFINITIONS: &str = "1.2";
    pub const WORKFLOW_ASSEMBLY: &str = "4.1";
}

/// Iterate canonical sections in order
pub fn sections() -> impl Iterator<Item = (u8, &'static str)> {
    SECTIONS.iter().copied()
}

/// Iterate canonical nodes in order
pub fn nodes() -> impl Iterator<Item = (&'static str, &'static str)> {
    NODES.iter().copied()
}

/// Display name of a canonical section
pub fn section_name(id: u8) -> Option<&'static str> {
    SECTIONS
        .iter()
        .find(|(section_id, _)| *section_id == id)
        .map(|(_, name)| *name)
}

/// Display name of a canonical node
pub fn node_name(id: &str) -> Option<&'static str> {
    NODES
        .iter()
        .find(|(node_id, _)| *node_id == id)
        .map(|(_, name)| *name)
}

/// Section a node id belongs to ("2.3" -> 2)
pub fn node_section(id: &str) -> Option<u8> {
    node_name(id)?;
    id.split('.').next()?.parse().ok()
}

/// Key used for a section in a structured payload ("section_3")
pub fn section_key(id: u8) -> String {
    format!("section_{}", id)
}

/// Key used for a node in a structured payload ("node_2_3")
pub fn node_key(id: &str) -> String {
    format!("node_{}", id.replace('.', "_"))
}
