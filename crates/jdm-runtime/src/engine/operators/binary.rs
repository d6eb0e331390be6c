//! Binary operator execution

use super::comparison::execute_compare;
use crate::error::{Result, RuntimeError};
use jdm_core::ast::Operator;
use jdm_core::Value;

/// Execute a binary operation
pub(crate) fn execute_binary_op(left: &Value, op: Operator, right: &Value) -> Result<Value> {
    match op {
        // Equality is structural and never fails; mixed types are unequal
        Operator::Eq => Ok(Value::Bool(left == right)),
        Operator::Ne => Ok(Value::Bool(left != right)),

        Operator::Lt | Operator::Le | Operator::Gt | Operator::Ge => {
            execute_compare(left, op, right).map(Value::Bool)
        }

        Operator::In => contains(right, left).map(Value::Bool),
        Operator::NotIn => contains(right, left).map(|found| Value::Bool(!found)),

        Operator::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        Operator::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),

        Operator::Add | Operator::Sub | Operator::Mul | Operator::Div | Operator::Mod | Operator::Pow => {
            execute_arithmetic(left, op, right)
        }
    }
}

fn execute_arithmetic(left: &Value, op: Operator, right: &Value) -> Result<Value> {
    match (left, op, right) {
        (Value::Number(l), Operator::Add, Value::Number(r)) => Ok(Value::Number(l + r)),
        (Value::Number(l), Operator::Sub, Value::Number(r)) => Ok(Value::Number(l - r)),
        (Value::Number(l), Operator::Mul, Value::Number(r)) => Ok(Value::Number(l * r)),
        (Value::Number(l), Operator::Div, Value::Number(r)) => {
            if *r == 0.0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Value::Number(l / r))
            }
        }
        (Value::Number(l), Operator::Mod, Value::Number(r)) => {
            if *r == 0.0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Value::Number(l % r))
            }
        }
        (Value::Number(l), Operator::Pow, Value::Number(r)) => Ok(Value::Number(l.powf(*r))),

        // String concatenation
        (Value::String(l), Operator::Add, Value::String(r)) => {
            let mut joined = String::with_capacity(l.len() + r.len());
            joined.push_str(l);
            joined.push_str(r);
            Ok(Value::String(joined))
        }

        _ => Err(RuntimeError::TypeError(format!(
            "Cannot apply '{}' to {} and {}",
            op.symbol(),
            left.type_name(),
            right.type_name()
        ))),
    }
}

/// Membership test behind `in` / `not in`
fn contains(haystack: &Value, needle: &Value) -> Result<bool> {
    match (haystack, needle) {
        (Value::Array(items), _) => Ok(items.iter().any(|item| item == needle)),
        (Value::String(s), Value::String(sub)) => Ok(s.contains(sub.as_str())),
        (Value::Object(map), Value::String(key)) => Ok(map.contains_key(key)),
        _ => Err(RuntimeError::TypeError(format!(
            "Cannot test membership of {} in {}",
            needle.type_name(),
            haystack.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(execute_binary_op(&num(2.0), Operator::Add, &num(3.0)), Ok(num(5.0)));
        assert_eq!(execute_binary_op(&num(7.0), Operator::Mod, &num(4.0)), Ok(num(3.0)));
        assert_eq!(execute_binary_op(&num(2.0), Operator::Pow, &num(10.0)), Ok(num(1024.0)));
        assert_eq!(
            execute_binary_op(&Value::from("ab"), Operator::Add, &Value::from("cd")),
            Ok(Value::from("abcd"))
        );
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            execute_binary_op(&num(1.0), Operator::Div, &num(0.0)),
            Err(RuntimeError::DivisionByZero)
        );
        assert_eq!(
            execute_binary_op(&num(1.0), Operator::Mod, &num(0.0)),
            Err(RuntimeError::DivisionByZero)
        );
    }

    #[test]
    fn test_arithmetic_type_mismatch() {
        let err = execute_binary_op(&Value::from("a"), Operator::Add, &num(1.0)).unwrap_err();
        assert!(matches!(err, RuntimeError::TypeError(ref msg) if msg.contains("string and number")));
        assert!(execute_binary_op(&Value::Null, Operator::Mul, &num(1.0)).is_err());
    }

    #[test]
    fn test_equality_never_fails() {
        assert_eq!(execute_binary_op(&num(1.0), Operator::Eq, &Value::from("1")), Ok(Value::Bool(false)));
        assert_eq!(execute_binary_op(&Value::Null, Operator::Ne, &num(0.0)), Ok(Value::Bool(true)));
        assert_eq!(
            execute_binary_op(
                &Value::Array(vec![num(1.0)]),
                Operator::Eq,
                &Value::Array(vec![num(1.0)])
            ),
            Ok(Value::Bool(true))
        );
    }

    #[test]
    fn test_membership() {
        let tiers = Value::Array(vec![Value::from("gold"), Value::from("silver")]);
        assert_eq!(execute_binary_op(&Value::from("gold"), Operator::In, &tiers), Ok(Value::Bool(true)));
        assert_eq!(execute_binary_op(&Value::from("bronze"), Operator::NotIn, &tiers), Ok(Value::Bool(true)));
        assert_eq!(
            execute_binary_op(&Value::from("ell"), Operator::In, &Value::from("hello")),
            Ok(Value::Bool(true))
        );
        assert!(execute_binary_op(&num(1.0), Operator::In, &num(1.0)).is_err());
    }
}
