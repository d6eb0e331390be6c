//! Built-in function library
//!
//! Every function is pure: it sees only its arguments. Arity and argument
//! types are checked on each call.

mod array;
mod conversion;
mod date;
mod math;
mod string;

use crate::error::{Result, RuntimeError};
use jdm_core::Value;
use std::collections::HashMap;

/// Call a built-in function by name
pub(crate) fn call(name: &str, args: &[Value]) -> Result<Value> {
    match name {
        // math
        "abs" => math::abs(args),
        "floor" => math::floor(args),
        "ceil" => math::ceil(args),
        "round" => math::round(args),
        "sqrt" => math::sqrt(args),
        "pow" => math::pow(args),
        "min" => math::min(args),
        "max" => math::max(args),
        "sum" => math::sum(args),
        "avg" => math::avg(args),
        "median" => math::median(args),

        // string
        "len" => string::len(args),
        "upper" => string::upper(args),
        "lower" => string::lower(args),
        "trim" => string::trim(args),
        "contains" => string::contains(args),
        "startsWith" => string::starts_with(args),
        "endsWith" => string::ends_with(args),
        "substring" => string::substring(args),
        "split" => string::split(args),
        "join" => string::join(args),
        "replace" => string::replace(args),
        "matches" => string::matches(args),

        // array
        "count" => array::count(args),
        "first" => array::first(args),
        "last" => array::last(args),
        "flatten" => array::flatten(args),
        "unique" => array::unique(args),
        "sort" => array::sort(args),
        "keys" => array::keys(args),
        "values" => array::values(args),

        // conversion
        "string" => conversion::to_string(args),
        "number" => conversion::to_number(args),
        "bool" => conversion::to_bool(args),
        "type" => conversion::type_of(args),
        "isNull" => conversion::is_null(args),

        // date
        "date" => date::date(args),
        "year" => date::year(args),
        "month" => date::month(args),
        "day" => date::day(args),
        "weekday" => date::weekday(args),
        "dateAdd" => date::date_add(args),
        "dateDiff" => date::date_diff(args),
        "formatDate" => date::format_date(args),

        _ => Err(RuntimeError::UnknownFunction(name.to_string())),
    }
}

/// Checked view over a function's arguments
struct Args<'a> {
    function: &'static str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    /// Require between `min` and `max` arguments
    fn new(function: &'static str, values: &'a [Value], min: usize, max: usize) -> Result<Self> {
        if values.len() < min || values.len() > max {
            let expected = if min == max {
                min.to_string()
            } else if max == usize::MAX {
                format!("at least {}", min)
            } else {
                format!("{} to {}", min, max)
            };
            return Err(RuntimeError::argument(
                function,
                format!("expected {} arguments, got {}", expected, values.len()),
            ));
        }
        Ok(Self { function, values })
    }

    fn exactly(function: &'static str, values: &'a [Value], count: usize) -> Result<Self> {
        Self::new(function, values, count, count)
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn value(&self, i: usize) -> &'a Value {
        &self.values[i]
    }

    fn error(&self, message: impl Into<String>) -> RuntimeError {
        RuntimeError::argument(self.function, message)
    }

    fn type_error(&self, i: usize, expected: &str) -> RuntimeError {
        self.error(format!(
            "argument {} must be {}, got {}",
            i + 1,
            expected,
            self.values[i].type_name()
        ))
    }

    fn number(&self, i: usize) -> Result<f64> {
        self.values[i].as_f64().ok_or_else(|| self.type_error(i, "a number"))
    }

    fn string(&self, i: usize) -> Result<&'a str> {
        self.values[i].as_str().ok_or_else(|| self.type_error(i, "a string"))
    }

    fn array(&self, i: usize) -> Result<&'a Vec<Value>> {
        self.values[i].as_array().ok_or_else(|| self.type_error(i, "an array"))
    }

    fn object(&self, i: usize) -> Result<&'a HashMap<String, Value>> {
        self.values[i].as_object().ok_or_else(|| self.type_error(i, "an object"))
    }

    /// Every element of an array argument as a number
    fn numbers(&self, i: usize) -> Result<Vec<f64>> {
        self.array(i)?
            .iter()
            .map(|item| {
                item.as_f64().ok_or_else(|| {
                    self.error(format!(
                        "array elements must be numbers, got {}",
                        item.type_name()
                    ))
                })
            })
            .collect()
    }
}
