//! DecisionEngine - main API for evaluating decisions
//!
//! # Architecture
//!
//! The module is organized into:
//! - `types`: evaluation options, results and the cancellation token
//! - `engine`: the `DecisionEngine` and its shared state
//! - `decision`: compiled, reusable `Decision` handles
//! - `loader_cache`: single-flight memoization of referenced decisions
//! - `graph_evaluator`: node state machine and dispatch for one call
//! - `tracer`: opt-in per-node trace recording

mod decision;
mod engine;
mod graph_evaluator;
mod loader_cache;
mod tracer;
mod types;

// Re-export public types
pub use decision::Decision;
pub use engine::DecisionEngine;
pub use types::{CancellationToken, EvaluationOptions, EvaluationResult};
