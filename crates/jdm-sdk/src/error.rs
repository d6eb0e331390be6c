//! SDK error types

use jdm_core::ExpressionError;
use jdm_parser::ParseError;
use jdm_runtime::Trace;
use thiserror::Error;

/// Engine error type
///
/// Parse-time failures (`MalformedDocument`, `InvalidGraph`) abort decision
/// creation. Every other variant is raised while evaluating and aborts the
/// whole call.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Document text is not well-formed structured data
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Document is well-formed but violates a graph invariant
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    /// Expression syntax or runtime failure inside a node
    #[error("Expression error in node '{node_id}': {error}")]
    Expression {
        node_id: String,
        error: ExpressionError,
    },

    /// The loader failed for a referenced key
    #[error("Failed to load decision '{key}': {cause}")]
    Loader { key: String, cause: anyhow::Error },

    /// A decision reference was met but the engine has no loader
    #[error("No loader configured to resolve decision references")]
    NoLoaderConfigured { node_id: Option<String> },

    /// A reference chain revisits a key that is still being evaluated
    #[error("Cyclic decision reference: {}", cycle.join(" -> "))]
    CyclicReference { cycle: Vec<String> },

    /// Decision references nest deeper than `max_depth`
    #[error("Decision nesting exceeds max depth {depth} while resolving '{key}'")]
    DepthLimitExceeded { depth: usize, key: String },

    /// The caller's cancellation token fired
    #[error("Evaluation cancelled")]
    Cancelled,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// An evaluation error together with the trace recorded up to the
    /// failing node
    #[error("{source}")]
    Traced {
        source: Box<EngineError>,
        trace: Trace,
    },
}

impl EngineError {
    /// The underlying error, with any trace wrapper removed
    pub fn root_cause(&self) -> &EngineError {
        match self {
            EngineError::Traced { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Id of the node that failed, where known
    pub fn node_id(&self) -> Option<&str> {
        match self {
            EngineError::Expression { node_id, .. } => Some(node_id),
            EngineError::NoLoaderConfigured { node_id } => node_id.as_deref(),
            EngineError::Traced { source, .. } => source.node_id(),
            _ => None,
        }
    }

    /// Trace recorded before the failure, when tracing was requested
    pub fn trace(&self) -> Option<&Trace> {
        match self {
            EngineError::Traced { trace, .. } => Some(trace),
            _ => None,
        }
    }

    /// Split off the trace wrapper
    pub(crate) fn into_parts(self) -> (EngineError, Option<Trace>) {
        match self {
            EngineError::Traced { source, trace } => (*source, Some(trace)),
            other => (other, None),
        }
    }
}

impl From<ParseError> for EngineError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::MalformedDocument(message) => EngineError::MalformedDocument(message),
            ParseError::InvalidGraph(message) => EngineError::InvalidGraph(message),
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, EngineError>;
