pub mod schema;
pub mod types;
pub mod validation;

pub use types::{
    ContentAnalysis, ExtractionSummary, Field, Node, ParsedDocument, Section, StructureAnalysis,
};
pub use validation::{Severity, ValidationResult, ValidationSummary};
