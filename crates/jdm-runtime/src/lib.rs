//! JDM Runtime - expression evaluation and node execution
//!
//! This crate evaluates compiled expressions against node inputs, runs the
//! expression, decision-table and switch node kinds, and defines the trace
//! records produced while a decision graph executes.

pub mod engine;
pub mod error;
mod functions;
pub mod nodes;
pub mod trace;

// Re-export main types
pub use engine::{Evaluator, Scope};
pub use error::{Result, RuntimeError};
pub use nodes::{
    evaluate_decision_table, evaluate_expression_node, evaluate_switch, ExpressionOutcome,
    TableOutcome,
};
pub use trace::{traces_match, MatchedRule, Trace, TraceData, TraceEntry};
