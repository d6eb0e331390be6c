//! Decision graph model
//!
//! A [`Document`] is the validated, immutable form of one decision: a set of
//! typed [`Node`]s joined by directed [`Edge`]s. Documents are built once when
//! a decision is created and shared read-only by every evaluation.

pub mod document;
pub mod edge;
pub mod node;

pub use document::Document;
pub use edge::{Edge, EdgeKind};
pub use node::{
    CompiledExpression, DecisionRefContent, DecisionTableContent, ExpressionContent,
    ExpressionEntry, HitPolicy, Node, NodeKind, RuleAssignment, RuleCondition, SwitchContent,
    SwitchStatement, TableInput, TableOutput, TableRule,
};
