//! Parser error types

use jdm_core::CoreError;
use thiserror::Error;

/// Document parser error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Text is not well-formed structured data, or lacks the document shape
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Well-formed, but a structural invariant of the graph is violated
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),
}

impl From<CoreError> for ParseError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidGraph(message) => ParseError::InvalidGraph(message),
            other => ParseError::InvalidGraph(other.to_string()),
        }
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
