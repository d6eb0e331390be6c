//! Runtime error types

use jdm_core::ExpressionError;
use thiserror::Error;

/// Runtime error raised while evaluating an expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Type error
    #[error("Type error: {0}")]
    TypeError(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    /// Bad arity or argument value for a library function
    #[error("{function}(): {message}")]
    InvalidArgument { function: String, message: String },
}

impl RuntimeError {
    pub(crate) fn argument(function: &str, message: impl Into<String>) -> Self {
        RuntimeError::InvalidArgument {
            function: function.to_string(),
            message: message.into(),
        }
    }

    /// Attach the source position of the failing expression
    pub fn at(self, position: usize) -> ExpressionError {
        ExpressionError::new(self.to_string(), position)
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
