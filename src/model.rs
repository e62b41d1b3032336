// src/model.rs
//
// Value types shared by the store, the miner, the predictor and the merger.

use chrono::NaiveDate;

/// One row of the dividend store.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoricalRecord {
    /// Display name, usually "Name (CODE)".
    pub company: String,
    pub ex_date: NaiveDate,
    /// Older rows occasionally lack a usable payment date.
    pub payment_date: Option<NaiveDate>,
    /// Payment cell as read when it is not a date ("TBD"); written back as is.
    pub payment_text: String,
    pub amount: f64,
    /// Free-text type column, carried through untouched.
    pub kind: String,
    /// Yield as published; never interpreted.
    pub yield_text: String,
}

impl HistoricalRecord {
    pub fn new(company: impl Into<String>, ex_date: NaiveDate, payment_date: NaiveDate, amount: f64) -> Self {
        Self {
            company: company.into(),
            ex_date,
            payment_date: Some(payment_date),
            payment_text: s!(),
            amount,
            kind: s!(),
            yield_text: s!(),
        }
    }
}

/// A candidate line from an update file, still as text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawEntry {
    /// 1-based line number in the source file.
    pub line: usize,
    /// Company after markdown cleanup ("Name (CODE)").
    pub company: String,
    pub ex_date: String,
    pub amount: String,
    pub payment_date: String,
    pub yield_text: String,
}

/// A recurring (month, day) ex-date slot for one company.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    pub month: u32,
    pub day: u32,
    /// Number of distinct years the slot was hit.
    pub frequency: usize,
    pub last_year: i32,
    pub avg_dividend: f64,
    /// Ascending, distinct.
    pub years: Vec<i32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    pub company: String,
    pub predicted_date: NaiveDate,
    pub days_until: i64,
    pub frequency: usize,
    pub last_occurrence: i32,
    pub avg_dividend: f64,
    /// 0..=100, one decimal.
    pub confidence: f64,
    pub pattern_years: Vec<i32>,
}
