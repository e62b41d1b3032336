// src/core/dates.rs
use chrono::NaiveDate;

use crate::config::consts::{DATE_FORMAT, ISO_DATE_FORMAT};

/// Parse a `DD.MM.YYYY` cell. Surrounding whitespace is ignored.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let t = s.trim();
    if t.is_empty() { return None; }
    NaiveDate::parse_from_str(t, DATE_FORMAT).ok()
}

pub fn format_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

pub fn format_iso(d: NaiveDate) -> String {
    d.format(ISO_DATE_FORMAT).to_string()
}

/// Calendar-checked construction; `None` for e.g. 29.02 in a common year.
pub fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a decimal amount cell ("1.25", " 0.5 ", "1,234.5").
pub fn parse_amount(s: &str) -> Option<f64> {
    let t: String = s.trim().chars().filter(|&c| c != ',').collect();
    if t.is_empty() { return None; }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Shortest text that parses back to the same amount.
pub fn format_amount(v: f64) -> String {
    format!("{v}")
}
