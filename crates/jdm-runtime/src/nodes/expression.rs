//! Expression node evaluation

use crate::engine::{Evaluator, Scope};
use jdm_core::graph::ExpressionContent;
use jdm_core::{ExpressionError, Value};
use std::collections::HashMap;

/// Output of an expression node and the value of each expression
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionOutcome {
    pub output: Value,
    pub results: HashMap<String, Value>,
}

/// Evaluate each expression against the node input and assign its result at
/// the entry's key path, in declaration order.
pub fn evaluate_expression_node(
    content: &ExpressionContent,
    input: &Value,
    context: &Value,
) -> Result<ExpressionOutcome, ExpressionError> {
    let scope = Scope::new(input, context);
    let mut output = Value::object();
    let mut results = HashMap::with_capacity(content.expressions.len());

    for entry in &content.expressions {
        let expr = entry.value.expression()?;
        let value = Evaluator::evaluate(expr, &scope)?;
        tracing::trace!("expression '{}' = {}", entry.key, value);

        output.set_path(&entry.key, value.clone());
        results.insert(entry.key.clone(), value);
    }

    Ok(ExpressionOutcome { output, results })
}
