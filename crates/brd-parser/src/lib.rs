//! Business-requirements document parser
//!
//! Reconstructs the canonical section / node / field schema from either
//! loosely structured free text or a JSON payload, then scores structural
//! completeness and content quality.
//!
//! Parsing never fails: every problem is reported as a string in
//! [`ParseOutcome::parsing_errors`] next to a best-effort document.
//!
//! # Example
//!
//! ```
//! use brd_parser::DocumentParser;
//!
//! let outcome = DocumentParser::default().parse("0.1 Executive Summary\nA modernization project", false);
//! assert!(outcome.document.node_text("0.1").is_some());
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod free_text;
pub mod structured;
pub mod text;

pub use config::ParserConfig;
pub use error::ParseError;
pub use text::{AuthorityStructure, TextAnalyzer};

use serde_json::Value;
use shared_types::{ExtractionSummary, ParsedDocument};
use tracing::{debug, warn};

/// Parser input, selected explicitly by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentInput {
    /// Loosely structured prose, markdown or plain text
    RawText(String),
    /// JSON object keyed by `section_<n>` / `node_<a>_<b>`
    StructuredPayload(Value),
}

impl DocumentInput {
    /// Build an input from text; `structured` text must be a JSON document
    pub fn from_content(content: &str, structured: bool) -> Result<Self, ParseError> {
        if structured {
            Ok(DocumentInput::StructuredPayload(serde_json::from_str(content)?))
        } else {
            Ok(DocumentInput::RawText(content.to_string()))
        }
    }
}

/// A best-effort document plus every non-fatal problem met while building it
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub document: ParsedDocument,
    pub parsing_errors: Vec<String>,
}

impl ParseOutcome {
    pub fn extraction_summary(&self) -> ExtractionSummary {
        ExtractionSummary::new(&self.document, &self.parsing_errors)
    }

    pub fn is_clean(&self) -> bool {
        self.parsing_errors.is_empty()
    }
}

/// Document parser holding the scoring configuration
#[derive(Debug, Clone, Default)]
pub struct DocumentParser {
    config: ParserConfig,
}

impl DocumentParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse text, treating it as JSON when `structured` is set
    pub fn parse(&self, content: &str, structured: bool) -> ParseOutcome {
        match DocumentInput::from_content(content, structured) {
            Ok(input) => self.parse_input(&input),
            Err(err) => {
                warn!("{}", err);
                let mut outcome = self.parse_input(&DocumentInput::StructuredPayload(empty_payload()));
                outcome.parsing_errors.insert(0, err.to_string());
                outcome
            }
        }
    }

    /// Decode raw bytes, then parse. Invalid UTF-8 is replaced and reported.
    pub fn parse_bytes(&self, bytes: &[u8], structured: bool) -> ParseOutcome {
        let (content, warning) = decode_bytes(bytes);
        let mut outcome = self.parse(&content, structured);
        if let Some(warning) = warning {
            warn!("{}", warning);
            outcome.parsing_errors.insert(0, warning.to_string());
        }
        outcome
    }

    pub fn parse_input(&self, input: &DocumentInput) -> ParseOutcome {
        let mut errors = Vec::new();
        let (sections, nodes) = match input {
            DocumentInput::RawText(text) => free_text::extract(text, &self.config),
            DocumentInput::StructuredPayload(payload) => {
                structured::extract(payload, &self.config, &mut errors)
            }
        };

        let structure_analysis = analysis::analyze_structure(&sections, &nodes, &self.config);
        let content_analysis = analysis::analyze_content(&nodes, &self.config);

        debug!(
            sections = structure_analysis.total_sections_present,
            nodes = structure_analysis.total_nodes_present,
            completeness = structure_analysis.completeness_percentage,
            quality = content_analysis.quality_score,
            "document parsed"
        );

        let parsing_errors: Vec<String> = errors.iter().map(ToString::to_string).collect();
        for err in &parsing_errors {
            warn!("{}", err);
        }

        ParseOutcome {
            document: ParsedDocument {
                sections,
                nodes,
                structure_analysis,
                content_analysis,
            },
            parsing_errors,
        }
    }
}

fn empty_payload() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Parse with the default configuration
pub fn parse(content: &str, structured: bool) -> ParseOutcome {
    DocumentParser::default().parse(content, structured)
}

/// Decode bytes as UTF-8 (BOM stripped), falling back to lossy decoding
pub fn decode_bytes(bytes: &[u8]) -> (String, Option<ParseError>) {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), None),
        Err(err) => (
            String::from_utf8_lossy(bytes).into_owned(),
            Some(ParseError::Extraction(format!(
                "invalid UTF-8 after byte {}, undecodable bytes were replaced",
                err.valid_up_to()
            ))),
        ),
    }
}
