//! Expression AST nodes
//!
//! Every node records the byte offset of the token that introduced it, so
//! evaluation failures can point back into the source text.

use super::operator::{Operator, UnaryOperator};
use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub kind: ExpressionKind,
    /// Byte offset into the source text
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionKind {
    /// Literal value
    Literal(Value),

    /// Root identifier (e.g., `customer`)
    Identifier(String),

    /// `$` - the node input, or the column value inside a decision-table cell
    Input,

    /// `$context` - the evaluation call's context
    Context,

    /// Member access (e.g., `customer.tier`)
    Member {
        object: Box<Expression>,
        property: String,
    },

    /// Bracket access (e.g., `items[0]`, `data["key"]`)
    Index {
        object: Box<Expression>,
        index: Box<Expression>,
    },

    /// Binary operation
    Binary {
        left: Box<Expression>,
        op: Operator,
        right: Box<Expression>,
    },

    /// Unary operation
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// Function call
    FunctionCall { name: String, args: Vec<Expression> },

    /// Ternary conditional (condition ? true_expr : false_expr)
    Ternary {
        condition: Box<Expression>,
        true_expr: Box<Expression>,
        false_expr: Box<Expression>,
    },

    /// Array literal
    Array(Vec<Expression>),

    /// Object literal, keys in source order
    Object(Vec<(String, Expression)>),

    /// Numeric interval (e.g., `[1..10)`)
    Interval {
        start: Box<Expression>,
        end: Box<Expression>,
        start_inclusive: bool,
        end_inclusive: bool,
    },
}

impl Expression {
    pub fn new(kind: ExpressionKind, position: usize) -> Self {
        Self { kind, position }
    }

    /// Create a literal expression
    pub fn literal(value: Value, position: usize) -> Self {
        Self::new(ExpressionKind::Literal(value), position)
    }

    /// Create a root identifier expression
    pub fn identifier(name: impl Into<String>, position: usize) -> Self {
        Self::new(ExpressionKind::Identifier(name.into()), position)
    }

    /// Create a `$` expression
    pub fn input(position: usize) -> Self {
        Self::new(ExpressionKind::Input, position)
    }

    /// Create a member access expression
    pub fn member(object: Expression, property: impl Into<String>, position: usize) -> Self {
        Self::new(
            ExpressionKind::Member {
                object: Box::new(object),
                property: property.into(),
            },
            position,
        )
    }

    /// Create a bracket access expression
    pub fn index(object: Expression, index: Expression, position: usize) -> Self {
        Self::new(
            ExpressionKind::Index {
                object: Box::new(object),
                index: Box::new(index),
            },
            position,
        )
    }

    /// Create a binary expression
    pub fn binary(left: Expression, op: Operator, right: Expression, position: usize) -> Self {
        Self::new(
            ExpressionKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            position,
        )
    }

    /// Create a unary expression
    pub fn unary(op: UnaryOperator, operand: Expression, position: usize) -> Self {
        Self::new(
            ExpressionKind::Unary {
                op,
                operand: Box::new(operand),
            },
            position,
        )
    }

    /// Create a function call expression
    pub fn function_call(name: impl Into<String>, args: Vec<Expression>, position: usize) -> Self {
        Self::new(
            ExpressionKind::FunctionCall {
                name: name.into(),
                args,
            },
            position,
        )
    }

    /// Create a ternary expression
    pub fn ternary(
        condition: Expression,
        true_expr: Expression,
        false_expr: Expression,
        position: usize,
    ) -> Self {
        Self::new(
            ExpressionKind::Ternary {
                condition: Box::new(condition),
                true_expr: Box::new(true_expr),
                false_expr: Box::new(false_expr),
            },
            position,
        )
    }

    /// Whether the expression mentions `$` anywhere
    ///
    /// Decision-table cells that mention `$` are boolean tests; all other
    /// cells are compared against the column value.
    pub fn references_input(&self) -> bool {
        match &self.kind {
            ExpressionKind::Input => true,
            ExpressionKind::Literal(_) | ExpressionKind::Identifier(_) | ExpressionKind::Context => {
                false
            }
            ExpressionKind::Member { object, .. } => object.references_input(),
            ExpressionKind::Index { object, index } => {
                object.references_input() || index.references_input()
            }
            ExpressionKind::Binary { left, right, .. } => {
                left.references_input() || right.references_input()
            }
            ExpressionKind::Unary { operand, .. } => operand.references_input(),
            ExpressionKind::FunctionCall { args, .. } | ExpressionKind::Array(args) => {
                args.iter().any(Expression::references_input)
            }
            ExpressionKind::Ternary {
                condition,
                true_expr,
                false_expr,
            } => {
                condition.references_input()
                    || true_expr.references_input()
                    || false_expr.references_input()
            }
            ExpressionKind::Object(entries) => entries.iter().any(|(_, e)| e.references_input()),
            ExpressionKind::Interval { start, end, .. } => {
                start.references_input() || end.references_input()
            }
        }
    }

    /// Shift every recorded position by `delta`, saturating at zero.
    ///
    /// Used when an expression was parsed from a rewritten form of the
    /// original text (decision-table cells).
    pub fn shift_positions(&mut self, delta: isize) {
        self.position = self.position.saturating_add_signed(delta);
        match &mut self.kind {
            ExpressionKind::Literal(_)
            | ExpressionKind::Identifier(_)
            | ExpressionKind::Input
            | ExpressionKind::Context => {}
            ExpressionKind::Member { object, .. } => object.shift_positions(delta),
            ExpressionKind::Index { object, index } => {
                object.shift_positions(delta);
                index.shift_positions(delta);
            }
            ExpressionKind::Binary { left, right, .. } => {
                left.shift_positions(delta);
                right.shift_positions(delta);
            }
            ExpressionKind::Unary { operand, .. } => operand.shift_positions(delta),
            ExpressionKind::FunctionCall { args, .. } | ExpressionKind::Array(args) => {
                args.iter_mut().for_each(|a| a.shift_positions(delta))
            }
            ExpressionKind::Ternary {
                condition,
                true_expr,
                false_expr,
            } => {
                condition.shift_positions(delta);
                true_expr.shift_positions(delta);
                false_expr.shift_positions(delta);
            }
            ExpressionKind::Object(entries) => entries
                .iter_mut()
                .for_each(|(_, e)| e.shift_positions(delta)),
            ExpressionKind::Interval { start, end, .. } => {
                start.shift_positions(delta);
                end.shift_positions(delta);
            }
        }
    }
}
