//! Ordering comparisons and interval membership

use crate::error::{Result, RuntimeError};
use jdm_core::ast::Operator;
use jdm_core::Value;
use std::cmp::Ordering;

/// Execute an ordering comparison (`<`, `<=`, `>`, `>=`)
pub(crate) fn execute_compare(left: &Value, op: Operator, right: &Value) -> Result<bool> {
    // A missing value never satisfies an ordering
    if left.is_null() || right.is_null() {
        tracing::debug!(
            "Null comparison: {} {} {}, returning false",
            left,
            op.symbol(),
            right
        );
        return Ok(false);
    }

    let ordering = match (left, right) {
        (Value::Number(l), Value::Number(r)) => l.partial_cmp(r),
        (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
        _ => {
            return Err(RuntimeError::TypeError(format!(
                "Cannot compare {} and {} with '{}'",
                left.type_name(),
                right.type_name(),
                op.symbol()
            )))
        }
    };

    // NaN is unordered: every ordering is false
    let Some(ordering) = ordering else {
        return Ok(false);
    };

    match op {
        Operator::Lt => Ok(ordering == Ordering::Less),
        Operator::Le => Ok(ordering != Ordering::Greater),
        Operator::Gt => Ok(ordering == Ordering::Greater),
        Operator::Ge => Ok(ordering != Ordering::Less),
        other => Err(RuntimeError::InvalidOperation(format!(
            "'{}' is not an ordering operator",
            other.symbol()
        ))),
    }
}

/// Whether `value` lies in the interval `start..end` with the given bounds
pub(crate) fn interval_contains(
    value: &Value,
    start: &Value,
    end: &Value,
    start_inclusive: bool,
    end_inclusive: bool,
) -> Result<bool> {
    let lower = if start_inclusive { Operator::Ge } else { Operator::Gt };
    let upper = if end_inclusive { Operator::Le } else { Operator::Lt };

    Ok(execute_compare(value, lower, start)? && execute_compare(value, upper, end)?)
}
