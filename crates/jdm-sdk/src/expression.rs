//! Standalone expression evaluation

use jdm_core::{ExpressionError, Value};
use jdm_parser::ExpressionParser;
use jdm_runtime::{Evaluator, Scope};

/// Parse and evaluate a single expression against `context`.
///
/// Identifiers and `$` both resolve against the context.
///
/// ```
/// use jdm_sdk::evaluate_expression;
/// use serde_json::json;
///
/// let value = evaluate_expression("customer.age >= 18", json!({"customer": {"age": 30}})).unwrap();
/// assert_eq!(value, jdm_sdk::Value::Bool(true));
/// ```
pub fn evaluate_expression(
    source: &str,
    context: impl Into<Value>,
) -> Result<Value, ExpressionError> {
    let context = context.into();
    let expression = ExpressionParser::parse(source)?;
    Evaluator::evaluate(&expression, &Scope::new(&context, &context))
}
