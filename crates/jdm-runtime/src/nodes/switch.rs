//! Switch node evaluation

use crate::engine::{Evaluator, Scope};
use jdm_core::graph::{HitPolicy, SwitchContent};
use jdm_core::{ExpressionError, Value};

/// Ids of the statements whose branches are taken, in statement order.
///
/// Under `First` only the first holding statement is returned. A statement
/// with no condition always holds.
pub fn evaluate_switch(
    content: &SwitchContent,
    input: &Value,
    context: &Value,
) -> Result<Vec<String>, ExpressionError> {
    let scope = Scope::new(input, context);
    let mut active = Vec::new();

    for statement in &content.statements {
        let holds = match &statement.condition {
            None => true,
            Some(condition) => Evaluator::test(condition.expression()?, &scope)?,
        };
        if holds {
            active.push(statement.id.clone());
            if content.hit_policy == HitPolicy::First {
                break;
            }
        }
    }

    Ok(active)
}
