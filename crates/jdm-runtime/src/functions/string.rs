//! String functions
//!
//! Lengths and offsets count characters, not bytes.

use super::Args;
use crate::error::Result;
use jdm_core::Value;
use regex::Regex;

/// Length of a string (characters), array or object
pub(super) fn len(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("len", values, 1)?;
    let len = match args.value(0) {
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        _ => return Err(args.type_error(0, "a string, array or object")),
    };
    Ok(Value::Number(len as f64))
}

pub(super) fn upper(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("upper", values, 1)?;
    Ok(Value::String(args.string(0)?.to_uppercase()))
}

pub(super) fn lower(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("lower", values, 1)?;
    Ok(Value::String(args.string(0)?.to_lowercase()))
}

pub(super) fn trim(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("trim", values, 1)?;
    Ok(Value::String(args.string(0)?.trim().to_string()))
}

/// Substring test for strings, element test for arrays
pub(super) fn contains(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("contains", values, 2)?;
    match args.value(0) {
        Value::Array(items) => Ok(Value::Bool(items.contains(args.value(1)))),
        Value::String(s) => Ok(Value::Bool(s.contains(args.string(1)?))),
        _ => Err(args.type_error(0, "a string or array")),
    }
}

pub(super) fn starts_with(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("startsWith", values, 2)?;
    Ok(Value::Bool(args.string(0)?.starts_with(args.string(1)?)))
}

pub(super) fn ends_with(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("endsWith", values, 2)?;
    Ok(Value::Bool(args.string(0)?.ends_with(args.string(1)?)))
}

/// `substring(s, start[, end])`; offsets are clamped to the string
pub(super) fn substring(values: &[Value]) -> Result<Value> {
    let args = Args::new("substring", values, 2, 3)?;
    let chars: Vec<char> = args.string(0)?.chars().collect();
    let clamp = |n: f64| n.max(0.0).min(chars.len() as f64) as usize;

    let start = clamp(args.number(1)?);
    let end = if args.len() == 3 {
        clamp(args.number(2)?)
    } else {
        chars.len()
    };

    if start >= end {
        return Ok(Value::String(String::new()));
    }
    Ok(Value::String(chars[start..end].iter().collect()))
}

pub(super) fn split(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("split", values, 2)?;
    let separator = args.string(1)?;
    if separator.is_empty() {
        return Err(args.error("separator must not be empty"));
    }
    Ok(Value::Array(
        args.string(0)?
            .split(separator)
            .map(|part| Value::String(part.to_string()))
            .collect(),
    ))
}

/// Join array elements with a separator; non-strings use their display form
pub(super) fn join(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("join", values, 2)?;
    let separator = args.string(1)?;
    let parts: Vec<String> = args.array(0)?.iter().map(Value::to_string).collect();
    Ok(Value::String(parts.join(separator)))
}

/// Replace every occurrence of a substring
pub(super) fn replace(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("replace", values, 3)?;
    let from = args.string(1)?;
    if from.is_empty() {
        return Err(args.error("search string must not be empty"));
    }
    Ok(Value::String(args.string(0)?.replace(from, args.string(2)?)))
}

/// Regular expression test
pub(super) fn matches(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("matches", values, 2)?;
    let pattern = args.string(1)?;
    let regex = Regex::new(pattern)
        .map_err(|e| args.error(format!("invalid pattern '{}': {}", pattern, e)))?;
    Ok(Value::Bool(regex.is_match(args.string(0)?)))
}
