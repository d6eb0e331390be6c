//! Array and object collection functions

use super::Args;
use crate::error::Result;
use jdm_core::Value;
use std::cmp::Ordering;

pub(super) fn count(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("count", values, 1)?;
    Ok(Value::Number(args.array(0)?.len() as f64))
}

/// First element, `null` when empty
pub(super) fn first(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("first", values, 1)?;
    Ok(args.array(0)?.first().cloned().unwrap_or(Value::Null))
}

/// Last element, `null` when empty
pub(super) fn last(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("last", values, 1)?;
    Ok(args.array(0)?.last().cloned().unwrap_or(Value::Null))
}

/// Flatten one level of nesting
pub(super) fn flatten(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("flatten", values, 1)?;
    let mut flat = Vec::new();
    for item in args.array(0)? {
        match item {
            Value::Array(inner) => flat.extend(inner.iter().cloned()),
            other => flat.push(other.clone()),
        }
    }
    Ok(Value::Array(flat))
}

/// Drop repeated elements, keeping first occurrences in order
pub(super) fn unique(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("unique", values, 1)?;
    let mut seen: Vec<Value> = Vec::new();
    for item in args.array(0)? {
        if !seen.contains(item) {
            seen.push(item.clone());
        }
    }
    Ok(Value::Array(seen))
}

/// Ascending sort of an all-number or all-string array
pub(super) fn sort(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("sort", values, 1)?;
    let mut items = args.array(0)?.clone();

    let all_numbers = items.iter().all(|v| matches!(v, Value::Number(_)));
    let all_strings = items.iter().all(|v| matches!(v, Value::String(_)));
    if !all_numbers && !all_strings {
        return Err(args.error("can only sort arrays of numbers or arrays of strings"));
    }

    items.sort_by(|a, b| match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.total_cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => Ordering::Equal,
    });
    Ok(Value::Array(items))
}

/// Object keys, sorted
pub(super) fn keys(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("keys", values, 1)?;
    let mut keys: Vec<&String> = args.object(0)?.keys().collect();
    keys.sort();
    Ok(Value::Array(keys.into_iter().map(|k| Value::String(k.clone())).collect()))
}

/// Object values, ordered by key
pub(super) fn values(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("values", values, 1)?;
    let mut entries: Vec<(&String, &Value)> = args.object(0)?.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    Ok(Value::Array(entries.into_iter().map(|(_, v)| v.clone()).collect()))
}
