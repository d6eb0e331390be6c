//! Error types for JDM Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A structural invariant of the decision graph is violated
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    #[error("Type error: {0}")]
    TypeError(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Expression syntax or evaluation failure
///
/// `position` is the byte offset into the expression source where the
/// problem was detected.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} (at position {position})")]
pub struct ExpressionError {
    pub message: String,
    pub position: usize,
}

impl ExpressionError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_graph_display() {
        let err = CoreError::InvalidGraph("edge 'e1' references unknown node 'x'".to_string());
        assert!(err.to_string().contains("Invalid graph"));
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_expression_error_display() {
        let err = ExpressionError::new("Unexpected token ')'", 7);
        assert_eq!(err.to_string(), "Unexpected token ')' (at position 7)");
        assert_eq!(err.position, 7);
    }
}
