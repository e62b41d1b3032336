// tests/common/mod.rs
#![allow(dead_code)]

use chrono::NaiveDate;
use tase_dividends::HistoricalRecord;

pub const STORE_HEADER: &str =
    "חברה,יום אקס דיבידנד,דיבידנד,סוג,תאריך תשלום,תשואה,Comfortable Date X\n";

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%d.%m.%Y").unwrap()
}

pub fn rec(company: &str, ex: &str, amount: f64) -> HistoricalRecord {
    let ex = d(ex);
    HistoricalRecord::new(company, ex, ex + chrono::TimeDelta::days(10), amount)
}

/// `||name|ex|amount||pay|` markdown row.
pub fn md_row(company: &str, ex: &str, amount: &str, pay: &str) -> String {
    format!("||{company}|{ex}|{amount}||{pay}|\n")
}
