//! Type conversion and inspection functions

use super::Args;
use crate::error::Result;
use jdm_core::Value;

/// Display form of any value
pub(super) fn to_string(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("string", values, 1)?;
    Ok(Value::String(args.value(0).to_string()))
}

pub(super) fn to_number(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("number", values, 1)?;
    match args.value(0) {
        Value::Number(n) => Ok(Value::Number(*n)),
        Value::Bool(b) => Ok(Value::Number(if *b { 1.0 } else { 0.0 })),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| args.error(format!("cannot convert '{}' to a number", s))),
        _ => Err(args.type_error(0, "a number, string or bool")),
    }
}

/// `"true"` / `"false"` parse; everything else uses truthiness
pub(super) fn to_bool(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("bool", values, 1)?;
    let value = match args.value(0) {
        Value::String(s) if s.eq_ignore_ascii_case("true") => true,
        Value::String(s) if s.eq_ignore_ascii_case("false") => false,
        other => other.is_truthy(),
    };
    Ok(Value::Bool(value))
}

pub(super) fn type_of(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("type", values, 1)?;
    Ok(Value::from(args.value(0).type_name()))
}

pub(super) fn is_null(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("isNull", values, 1)?;
    Ok(Value::Bool(args.value(0).is_null()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(to_string(&[Value::Number(42.0)]), Ok(Value::from("42")));
        assert_eq!(to_number(&[Value::from(" 3.5 ")]), Ok(Value::Number(3.5)));
        assert!(to_number(&[Value::from("abc")]).is_err());
        assert!(to_number(&[Value::Null]).is_err());
        assert_eq!(to_bool(&[Value::from("false")]), Ok(Value::Bool(false)));
        assert_eq!(to_bool(&[Value::Number(2.0)]), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_inspection() {
        assert_eq!(type_of(&[Value::Array(vec![])]), Ok(Value::from("array")));
        assert_eq!(is_null(&[Value::Null]), Ok(Value::Bool(true)));
        assert_eq!(is_null(&[Value::Bool(false)]), Ok(Value::Bool(false)));
    }
}
