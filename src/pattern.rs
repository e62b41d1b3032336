// src/pattern.rs
//
// Pattern mining: per company, which (month, day) ex-date slots recur
// across years.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, TimeDelta};
use tracing::debug;

use crate::config::consts::{MIN_PATTERN_YEARS, RECENT_WINDOW_DAYS};
use crate::model::{HistoricalRecord, Pattern};

/// Company name → its recurring slots, ordered by (month, day).
pub type CompanyPatterns = BTreeMap<String, Vec<Pattern>>;

/// Group records by exact company string.
pub fn group_by_company(records: &[HistoricalRecord]) -> BTreeMap<&str, Vec<&HistoricalRecord>> {
    let mut by_company: BTreeMap<&str, Vec<&HistoricalRecord>> = BTreeMap::new();
    for r in records {
        by_company.entry(r.company.as_str()).or_default().push(r);
    }
    by_company
}

/// First day of the recent-announcement window ending at `today`.
pub fn recent_cutoff(today: NaiveDate) -> NaiveDate {
    today - TimeDelta::days(RECENT_WINDOW_DAYS)
}

/// Mine recurring ex-date slots for every eligible company.
///
/// A company is skipped when it has fewer than `min_frequency` records, or
/// when any of its ex-dates falls on or after `today - RECENT_WINDOW_DAYS`
/// (it has already announced). Companies left with no slot are omitted.
pub fn mine_patterns(
    records: &[HistoricalRecord],
    min_frequency: usize,
    today: NaiveDate,
) -> CompanyPatterns {
    let cutoff = recent_cutoff(today);
    let mut out = CompanyPatterns::new();

    for (company, recs) in group_by_company(records) {
        if recs.len() < min_frequency {
            debug!(company, records = recs.len(), min_frequency, "not enough history");
            continue;
        }
        if let Some(recent) = recs.iter().map(|r| r.ex_date).filter(|d| *d >= cutoff).max() {
            debug!(company, %recent, "announced recently");
            continue;
        }

        let patterns = company_patterns(&recs);
        if patterns.is_empty() { continue; }
        out.insert(s!(company), patterns);
    }

    out
}

#[derive(Default)]
struct Slot {
    years: BTreeSet<i32>,
    total: f64,
    count: usize,
}

/// Slots of one company hit in at least `MIN_PATTERN_YEARS` distinct years.
/// `avg_dividend` averages every record on the slot, across all years.
pub fn company_patterns(recs: &[&HistoricalRecord]) -> Vec<Pattern> {
    let mut slots: BTreeMap<(u32, u32), Slot> = BTreeMap::new();
    for r in recs {
        let slot = slots.entry((r.ex_date.month(), r.ex_date.day())).or_default();
        slot.years.insert(r.ex_date.year());
        slot.total += r.amount;
        slot.count += 1;
    }

    slots
        .into_iter()
        .filter(|(_, s)| s.years.len() >= MIN_PATTERN_YEARS)
        .filter_map(|((month, day), s)| {
            let last_year = *s.years.last()?;
            Some(Pattern {
                month,
                day,
                frequency: s.years.len(),
                last_year,
                avg_dividend: s.total / s.count as f64,
                years: s.years.into_iter().collect(),
            })
        })
        .collect()
}
