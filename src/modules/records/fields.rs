//! Tolerant field readers for loosely-typed source rows.
//!
//! Every reader returns `None` for a missing, null or unparseable field.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

fn field<'a>(row: &'a Value, name: &str) -> Option<&'a Value> {
    row.as_object()?.get(name).filter(|v| !v.is_null())
}

/// Non-blank string, trimmed; numbers are rendered as strings
pub fn string_field(row: &Value, name: &str) -> Option<String> {
    let text = match field(row, name)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Decimal from a JSON number or a numeric string
pub fn decimal_field(row: &Value, name: &str) -> Option<Decimal> {
    match field(row, name)? {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// UTC instant from RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]` or `YYYY-MM-DD`
///
/// Values without an offset are taken as UTC.
pub fn timestamp_field(row: &Value, name: &str) -> Option<DateTime<Utc>> {
    match field(row, name)? {
        Value::String(s) => parse_timestamp(s.trim()),
        _ => None,
    }
}

pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
