//! Lenient scalar parsers shared by draft normalization and data loading.
//!
//! Every parser takes untrimmed user or wire input and returns `None` when the
//! text cannot be read as the requested type.

use std::str::FromStr;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;

use super::types::Money;

/// Date format used for date cells.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parses a finite floating point number.
pub fn parse_number(input: &str) -> Option<f64> {
    let n = f64::from_str(input.trim()).ok()?;
    n.is_finite().then_some(n)
}

/// Parses an integer. Whole floats such as `3.0` are accepted.
pub fn parse_integer(input: &str) -> Option<i64> {
    let input = input.trim();
    if let Ok(n) = i64::from_str(input) {
        return Some(n);
    }
    let n = parse_number(input)?;
    (n.fract() == 0.0 && n.abs() < i64::MAX as f64).then_some(n as i64)
}

/// Parses a currency amount, ignoring a leading `$`, thousands separators and spaces.
pub fn parse_currency(input: &str) -> Option<Money> {
    Money::parse(input)
}

/// Converts a JSON float into money.
pub fn money_from_f64(value: f64) -> Option<Money> {
    Money::from_f64(value)
}

/// Parses a boolean from the usual spellings.
pub fn parse_bool(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" => Some(true),
        "false" | "no" | "n" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

/// Parses an RFC 3339 timestamp, or a naive `YYYY-MM-DD HH:MM[:SS]` taken as UTC.
pub fn parse_datetime(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|naive| naive.and_utc())
}
