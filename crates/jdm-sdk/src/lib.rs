//! JDM Decision Engine SDK
//!
//! High-level API for compiling and evaluating decision graphs. A
//! [`DecisionEngine`] turns document text into reusable [`Decision`]s, and
//! resolves `decisionNode` references through a [`DocumentLoader`].

pub mod builder;
pub mod config;
pub mod decision_engine;
pub mod error;
mod expression;

// Re-export main types
pub use builder::DecisionEngineBuilder;
pub use config::EngineConfig;
pub use decision_engine::{
    CancellationToken, Decision, DecisionEngine, EvaluationOptions, EvaluationResult,
};
pub use error::{EngineError, Result};
pub use expression::evaluate_expression;

// Re-export commonly used types from dependencies
pub use jdm_core::{Document, ExpressionError, Value};
pub use jdm_repository::{DocumentLoader, FileSystemLoader, FnLoader, MemoryLoader};
pub use jdm_runtime::{traces_match, MatchedRule, Trace, TraceData, TraceEntry};
