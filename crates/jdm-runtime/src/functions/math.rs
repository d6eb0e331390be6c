//! Math functions

use super::Args;
use crate::error::Result;
use jdm_core::Value;

pub(super) fn abs(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("abs", values, 1)?;
    Ok(Value::Number(args.number(0)?.abs()))
}

pub(super) fn floor(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("floor", values, 1)?;
    Ok(Value::Number(args.number(0)?.floor()))
}

pub(super) fn ceil(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("ceil", values, 1)?;
    Ok(Value::Number(args.number(0)?.ceil()))
}

/// `round(x)` or `round(x, digits)`; halves round away from zero
pub(super) fn round(values: &[Value]) -> Result<Value> {
    let args = Args::new("round", values, 1, 2)?;
    let x = args.number(0)?;
    if args.len() == 1 {
        return Ok(Value::Number(x.round()));
    }

    let digits = args.number(1)?;
    if digits.fract() != 0.0 || !(0.0..=15.0).contains(&digits) {
        return Err(args.error("digits must be an integer between 0 and 15"));
    }
    let factor = 10f64.powi(digits as i32);
    Ok(Value::Number((x * factor).round() / factor))
}

pub(super) fn sqrt(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("sqrt", values, 1)?;
    let x = args.number(0)?;
    if x < 0.0 {
        return Err(args.error("cannot take the square root of a negative number"));
    }
    Ok(Value::Number(x.sqrt()))
}

pub(super) fn pow(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("pow", values, 2)?;
    Ok(Value::Number(args.number(0)?.powf(args.number(1)?)))
}

pub(super) fn min(values: &[Value]) -> Result<Value> {
    extremum("min", values, f64::min)
}

pub(super) fn max(values: &[Value]) -> Result<Value> {
    extremum("max", values, f64::max)
}

/// `min([..])` / `min(a, b, ..)`; `null` for an empty array
fn extremum(function: &'static str, values: &[Value], pick: fn(f64, f64) -> f64) -> Result<Value> {
    let args = Args::new(function, values, 1, usize::MAX)?;
    let numbers = if args.len() == 1 && args.value(0).as_array().is_some() {
        args.numbers(0)?
    } else {
        (0..args.len()).map(|i| args.number(i)).collect::<Result<Vec<_>>>()?
    };

    Ok(numbers
        .into_iter()
        .reduce(pick)
        .map(Value::Number)
        .unwrap_or(Value::Null))
}

pub(super) fn sum(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("sum", values, 1)?;
    Ok(Value::Number(args.numbers(0)?.iter().sum()))
}

/// Arithmetic mean; `null` for an empty array
pub(super) fn avg(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("avg", values, 1)?;
    let numbers = args.numbers(0)?;
    if numbers.is_empty() {
        return Ok(Value::Null);
    }
    Ok(Value::Number(numbers.iter().sum::<f64>() / numbers.len() as f64))
}

pub(super) fn median(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("median", values, 1)?;
    let mut numbers = args.numbers(0)?;
    if numbers.is_empty() {
        return Ok(Value::Null);
    }

    numbers.sort_by(f64::total_cmp);
    let mid = numbers.len() / 2;
    let median = if numbers.len() % 2 == 0 {
        (numbers[mid - 1] + numbers[mid]) / 2.0
    } else {
        numbers[mid]
    };
    Ok(Value::Number(median))
}
