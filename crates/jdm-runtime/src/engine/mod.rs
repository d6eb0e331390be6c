//! Expression evaluation engine
//!
//! Walks a compiled [`Expression`] tree against a [`Scope`]. Failures carry
//! the byte position of the sub-expression that raised them.

mod field_lookup;
mod operators;

use crate::functions;
use field_lookup::{get_index, get_member};
use jdm_core::ast::{Expression, ExpressionKind, Operator};
use jdm_core::{ExpressionError, Value};
use operators::{execute_binary_op, execute_unary_op, interval_contains};
use std::collections::HashMap;

type Result<T> = std::result::Result<T, ExpressionError>;

/// Variables visible to an expression
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    /// Node input; bare identifiers are looked up here first
    input: &'a Value,
    /// Call context, reachable through `$context` and as identifier fallback
    context: &'a Value,
    /// Overrides `$` (the column value inside decision-table cells)
    subject: Option<&'a Value>,
}

impl<'a> Scope<'a> {
    pub fn new(input: &'a Value, context: &'a Value) -> Self {
        Self {
            input,
            context,
            subject: None,
        }
    }

    /// Bind `$` to `subject` instead of the node input
    pub fn with_subject(self, subject: &'a Value) -> Self {
        Self {
            subject: Some(subject),
            ..self
        }
    }

    fn dollar(&self) -> &'a Value {
        self.subject.unwrap_or(self.input)
    }

    /// A bare `input` that is not a field of either value names the node input
    fn resolve(&self, name: &str) -> Value {
        match self.input.get(name).or_else(|| self.context.get(name)) {
            Some(value) => value.clone(),
            None if name == "input" => self.input.clone(),
            None => Value::Null,
        }
    }
}

/// Expression evaluator
pub struct Evaluator;

impl Evaluator {
    /// Evaluate an expression to a value
    pub fn evaluate(expr: &Expression, scope: &Scope<'_>) -> Result<Value> {
        match &expr.kind {
            ExpressionKind::Literal(value) => Ok(value.clone()),
            ExpressionKind::Identifier(name) => Ok(scope.resolve(name)),
            ExpressionKind::Input => Ok(scope.dollar().clone()),
            ExpressionKind::Context => Ok(scope.context.clone()),

            ExpressionKind::Member { object, property } => {
                let target = Self::evaluate(object, scope)?;
                get_member(&target, property).map_err(|e| e.at(expr.position))
            }
            ExpressionKind::Index { object, index } => {
                let target = Self::evaluate(object, scope)?;
                let index = Self::evaluate(index, scope)?;
                get_index(&target, &index).map_err(|e| e.at(expr.position))
            }

            ExpressionKind::Binary { left, op, right } => {
                Self::evaluate_binary(expr.position, left, *op, right, scope)
            }
            ExpressionKind::Unary { op, operand } => {
                let value = Self::evaluate(operand, scope)?;
                execute_unary_op(&value, *op).map_err(|e| e.at(expr.position))
            }

            ExpressionKind::FunctionCall { name, args } => {
                let values = args
                    .iter()
                    .map(|arg| Self::evaluate(arg, scope))
                    .collect::<Result<Vec<_>>>()?;
                functions::call(name, &values).map_err(|e| e.at(expr.position))
            }

            ExpressionKind::Ternary {
                condition,
                true_expr,
                false_expr,
            } => {
                if Self::test(condition, scope)? {
                    Self::evaluate(true_expr, scope)
                } else {
                    Self::evaluate(false_expr, scope)
                }
            }

            ExpressionKind::Array(items) => items
                .iter()
                .map(|item| Self::evaluate(item, scope))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            ExpressionKind::Object(entries) => {
                let mut map = HashMap::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(key.clone(), Self::evaluate(value, scope)?);
                }
                Ok(Value::Object(map))
            }

            ExpressionKind::Interval { .. } => Err(ExpressionError::new(
                "An interval can only be used on the right of 'in'",
                expr.position,
            )),
        }
    }

    /// Evaluate an expression and reduce it to its truthiness
    pub fn test(expr: &Expression, scope: &Scope<'_>) -> Result<bool> {
        Self::evaluate(expr, scope).map(|value| value.is_truthy())
    }

    fn evaluate_binary(
        position: usize,
        left: &Expression,
        op: Operator,
        right: &Expression,
        scope: &Scope<'_>,
    ) -> Result<Value> {
        match op {
            Operator::And => {
                if !Self::test(left, scope)? {
                    return Ok(Value::Bool(false));
                }
                Self::test(right, scope).map(Value::Bool)
            }
            Operator::Or => {
                if Self::test(left, scope)? {
                    return Ok(Value::Bool(true));
                }
                Self::test(right, scope).map(Value::Bool)
            }
            Operator::In | Operator::NotIn => {
                if let ExpressionKind::Interval {
                    start,
                    end,
                    start_inclusive,
                    end_inclusive,
                } = &right.kind
                {
                    let value = Self::evaluate(left, scope)?;
                    let start = Self::evaluate(start, scope)?;
                    let end = Self::evaluate(end, scope)?;
                    let inside =
                        interval_contains(&value, &start, &end, *start_inclusive, *end_inclusive)
                            .map_err(|e| e.at(position))?;
                    return Ok(Value::Bool(inside == (op == Operator::In)));
                }
                Self::evaluate_operands(position, left, op, right, scope)
            }
            _ => Self::evaluate_operands(position, left, op, right, scope),
        }
    }

    fn evaluate_operands(
        position: usize,
        left: &Expression,
        op: Operator,
        right: &Expression,
        scope: &Scope<'_>,
    ) -> Result<Value> {
        let left = Self::evaluate(left, scope)?;
        let right = Self::evaluate(right, scope)?;
        execute_binary_op(&left, op, &right).map_err(|e| e.at(position))
    }
}
