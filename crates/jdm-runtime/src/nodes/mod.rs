//! Evaluation of node kinds that run expressions
//!
//! Input, output and decision-reference nodes need graph or loader context
//! and are handled by the graph evaluator.

mod decision_table;
mod expression;
mod switch;

pub use decision_table::{evaluate_decision_table, TableOutcome};
pub use expression::{evaluate_expression_node, ExpressionOutcome};
pub use switch::evaluate_switch;
