use thiserror::Error;

/// Non-fatal problems met while building a ParsedDocument.
///
/// The parser never returns these; they are rendered into
/// `ParseOutcome::parsing_errors` and parsing continues.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Structured content parsing error: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Structured content parsing error: expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}
