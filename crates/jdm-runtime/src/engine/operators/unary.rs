//! Unary operator execution

use crate::error::{Result, RuntimeError};
use jdm_core::ast::UnaryOperator;
use jdm_core::Value;

/// Execute a unary operation
pub(crate) fn execute_unary_op(operand: &Value, op: UnaryOperator) -> Result<Value> {
    match (op, operand) {
        (UnaryOperator::Not, value) => Ok(Value::Bool(!value.is_truthy())),
        (UnaryOperator::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOperator::Negate, other) => Err(RuntimeError::TypeError(format!(
            "Cannot negate {}",
            other.type_name()
        ))),
    }
}
