// src/predict.rs
//
// Project mined slots onto this year and next, keep the ones inside the
// horizon, and score them.

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::config::consts::*;
use crate::core::dates;
use crate::model::{Pattern, Prediction};
use crate::pattern::CompanyPatterns;

/// Heuristic 0..=100 score, one decimal.
///
/// Frequency saturates at five years. Recency is full while the predicted
/// year directly follows (or equals) the last observed year and drops by a
/// fifth for every year of gap after that, never below zero.
pub fn confidence(frequency: usize, last_year: i32, predicted_year: i32) -> f64 {
    let frequency_score = (frequency as f64 / FREQUENCY_SATURATION).min(1.0);
    let years_since = f64::from(predicted_year - last_year);
    let recency_score = (1.0 - (years_since - 1.0) * RECENCY_DECAY_PER_YEAR).clamp(0.0, 1.0);
    round1((FREQUENCY_WEIGHT * frequency_score + RECENCY_WEIGHT * recency_score) * 100.0)
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Candidate dates for one slot: this year and next, when the calendar allows.
pub fn candidates(p: &Pattern, today: NaiveDate) -> impl Iterator<Item = NaiveDate> + '_ {
    [today.year(), today.year() + 1]
        .into_iter()
        .filter_map(move |y| dates::ymd(y, p.month, p.day))
}

/// Predictions within `[today, today + horizon_days]`, soonest first,
/// ties by higher confidence.
pub fn predict(patterns: &CompanyPatterns, horizon_days: u32, today: NaiveDate) -> Vec<Prediction> {
    // Past the calendar's end every candidate is inside the window.
    let end = today
        .checked_add_signed(TimeDelta::days(i64::from(horizon_days)))
        .unwrap_or(NaiveDate::MAX);
    let mut out = Vec::new();

    for (company, slots) in patterns {
        for p in slots {
            for date in candidates(p, today) {
                if date < today || date > end { continue; }
                out.push(Prediction {
                    company: company.clone(),
                    predicted_date: date,
                    days_until: (date - today).num_days(),
                    frequency: p.frequency,
                    last_occurrence: p.last_year,
                    avg_dividend: p.avg_dividend,
                    confidence: confidence(p.frequency, p.last_year, date.year()),
                    pattern_years: p.years.clone(),
                });
            }
        }
    }

    out.sort_by(|a, b| {
        a.days_until
            .cmp(&b.days_until)
            .then_with(|| b.confidence.partial_cmp(&a.confidence).unwrap_or(Ordering::Equal))
    });
    out
}
