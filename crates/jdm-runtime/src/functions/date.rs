//! Date functions
//!
//! Dates are accepted as RFC 3339 strings, `YYYY-MM-DD[ HH:MM:SS]` strings
//! (UTC) or unix timestamps in seconds. Functions that produce a date return
//! unix seconds.

use super::Args;
use crate::error::Result;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};
use jdm_core::Value;

/// Calendar and clock units understood by `dateAdd` / `dateDiff`
#[derive(Debug, Clone, Copy, PartialEq)]
enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Unit {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "s" | "second" | "seconds" => Some(Unit::Second),
            "m" | "minute" | "minutes" => Some(Unit::Minute),
            "h" | "hour" | "hours" => Some(Unit::Hour),
            "d" | "day" | "days" => Some(Unit::Day),
            "w" | "week" | "weeks" => Some(Unit::Week),
            "M" | "month" | "months" => Some(Unit::Month),
            "y" | "year" | "years" => Some(Unit::Year),
            _ => None,
        }
    }

    /// Length in seconds for fixed-length units
    fn seconds(self) -> Option<i64> {
        match self {
            Unit::Second => Some(1),
            Unit::Minute => Some(60),
            Unit::Hour => Some(3_600),
            Unit::Day => Some(86_400),
            Unit::Week => Some(604_800),
            Unit::Month | Unit::Year => None,
        }
    }
}

impl Args<'_> {
    fn datetime(&self, i: usize) -> Result<DateTime<Utc>> {
        match self.value(i) {
            Value::Number(n) => {
                let secs = n.floor();
                let nanos = ((n - secs) * 1e9).round() as u32;
                if !secs.is_finite() || secs.abs() > 1e14 {
                    return Err(self.error(format!("timestamp {} is out of range", n)));
                }
                Utc.timestamp_opt(secs as i64, nanos.min(999_999_999))
                    .single()
                    .ok_or_else(|| self.error(format!("timestamp {} is out of range", n)))
            }
            Value::String(s) => parse_date(s)
                .ok_or_else(|| self.error(format!("cannot parse '{}' as a date", s))),
            _ => Err(self.type_error(i, "a date string or timestamp")),
        }
    }

    fn unit(&self, i: usize) -> Result<Unit> {
        let name = self.string(i)?;
        Unit::parse(name).ok_or_else(|| self.error(format!("unknown unit '{}'", name)))
    }
}

fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn timestamp(dt: DateTime<Utc>) -> Value {
    Value::Number(dt.timestamp_millis() as f64 / 1000.0)
}

/// Normalize a date to unix seconds
pub(super) fn date(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("date", values, 1)?;
    Ok(timestamp(args.datetime(0)?))
}

pub(super) fn year(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("year", values, 1)?;
    Ok(Value::Number(args.datetime(0)?.year() as f64))
}

/// Month of the year, 1-12
pub(super) fn month(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("month", values, 1)?;
    Ok(Value::Number(args.datetime(0)?.month() as f64))
}

pub(super) fn day(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("day", values, 1)?;
    Ok(Value::Number(args.datetime(0)?.day() as f64))
}

/// ISO weekday, Monday = 1 .. Sunday = 7
pub(super) fn weekday(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("weekday", values, 1)?;
    Ok(Value::Number(
        args.datetime(0)?.weekday().number_from_monday() as f64,
    ))
}

/// `dateAdd(date, amount, unit)`; negative amounts subtract
pub(super) fn date_add(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("dateAdd", values, 3)?;
    let start = args.datetime(0)?;
    let amount = args.number(1)?;
    let unit = args.unit(2)?;

    if amount.fract() != 0.0 || amount.abs() > 1e9 {
        return Err(args.error("amount must be an integer no larger than 1e9"));
    }
    let amount = amount as i64;

    let shifted = match unit.seconds() {
        Some(per_unit) => start.checked_add_signed(Duration::seconds(amount * per_unit)),
        None => {
            let months = if unit == Unit::Year { amount * 12 } else { amount };
            let magnitude = Months::new(months.unsigned_abs() as u32);
            if months >= 0 {
                start.checked_add_months(magnitude)
            } else {
                start.checked_sub_months(magnitude)
            }
        }
    };

    shifted
        .map(timestamp)
        .ok_or_else(|| args.error("resulting date is out of range"))
}

/// `dateDiff(from, to, unit)`: whole units from `from` to `to`, truncated
/// toward zero
pub(super) fn date_diff(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("dateDiff", values, 3)?;
    let from = args.datetime(0)?;
    let to = args.datetime(1)?;
    let unit = args.unit(2)?;

    let diff = match unit.seconds() {
        Some(per_unit) => (to - from).num_seconds() / per_unit,
        None => {
            let months = whole_months(from, to);
            if unit == Unit::Year {
                months / 12
            } else {
                months
            }
        }
    };
    Ok(Value::Number(diff as f64))
}

/// Complete calendar months between two instants, signed
fn whole_months(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    if to < from {
        return -whole_months(to, from);
    }
    let mut months =
        (to.year() as i64 - from.year() as i64) * 12 + to.month() as i64 - from.month() as i64;
    // The last month is incomplete when `to` falls earlier in its month
    if months > 0 {
        let anniversary = from.checked_add_months(Months::new(months as u32));
        if anniversary.map_or(true, |a| a > to) {
            months -= 1;
        }
    }
    months
}

/// `formatDate(date, format)` with strftime-style directives
pub(super) fn format_date(values: &[Value]) -> Result<Value> {
    let args = Args::exactly("formatDate", values, 2)?;
    let dt = args.datetime(0)?;
    let format = args.string(1)?;

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(args.error(format!("invalid format string '{}'", format)));
    }
    Ok(Value::String(dt.format(format).to_string()))
}
