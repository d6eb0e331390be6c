//! Error types for the loader layer

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors raised by the built-in loaders
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No document is stored under the key
    #[error("Document not found: {key}")]
    NotFound { key: String },

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid loader root
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Key would resolve outside the loader root
    #[error("Key '{key}' resolves outside the document root")]
    PathTraversal { key: String },

    /// Stored bytes are not text
    #[error("Document '{key}' is not valid UTF-8")]
    InvalidEncoding { key: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RepositoryError::NotFound {
            key: "fees.json".to_string(),
        };
        assert_eq!(err.to_string(), "Document not found: fees.json");

        let err = RepositoryError::PathTraversal {
            key: "../secret".to_string(),
        };
        assert!(err.to_string().contains("../secret"));
    }
}
