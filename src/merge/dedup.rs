// src/merge/dedup.rs
//
// Two separate passes:
//   1. within the incoming batch: exact (company, ex-date, amount) repeats
//   2. against the store: same ex-date, amount within tolerance, and (policy
//      permitting) the same normalized company name

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::config::consts::AMOUNT_TOLERANCE;
use crate::config::options::DedupPolicy;
use crate::core::{dates, sanitize::dedup_name};
use crate::model::HistoricalRecord;

/// Composite key for the within-batch pass.
pub fn batch_key(r: &HistoricalRecord) -> (String, NaiveDate, String) {
    (r.company.clone(), r.ex_date, dates::format_amount(r.amount))
}

/// Split into first occurrences and later repeats, order preserved.
pub fn split_batch_duplicates<T>(
    items: Vec<T>,
    record: impl Fn(&T) -> &HistoricalRecord,
) -> (Vec<T>, Vec<T>) {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(items.len());
    let mut repeats = Vec::new();
    for it in items {
        if seen.insert(batch_key(record(&it))) {
            kept.push(it);
        } else {
            repeats.push(it);
        }
    }
    (kept, repeats)
}

/// How an incoming record matched the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreMatch {
    /// Same normalized name, ex-date and amount.
    SameCompany,
    /// Same ex-date and amount under a different name.
    SameDateAmount { company: String },
}

/// Store records indexed by ex-date for the against-store pass.
pub struct StoreIndex<'a> {
    by_date: HashMap<NaiveDate, Vec<(String, &'a HistoricalRecord)>>,
}

impl<'a> StoreIndex<'a> {
    pub fn new(existing: &'a [HistoricalRecord]) -> Self {
        let mut by_date: HashMap<NaiveDate, Vec<(String, &'a HistoricalRecord)>> = HashMap::new();
        for r in existing {
            by_date.entry(r.ex_date).or_default().push((dedup_name(&r.company), r));
        }
        Self { by_date }
    }

    /// Look an incoming record up. A same-name hit wins over a name-blind one.
    pub fn find(&self, r: &HistoricalRecord, policy: DedupPolicy) -> Option<StoreMatch> {
        let same_day = self.by_date.get(&r.ex_date)?;
        let name = dedup_name(&r.company);
        let close = |e: &HistoricalRecord| (e.amount - r.amount).abs() < AMOUNT_TOLERANCE;

        if same_day.iter().any(|(n, e)| *n == name && close(*e)) {
            return Some(StoreMatch::SameCompany);
        }
        match policy {
            DedupPolicy::Strict => None,
            DedupPolicy::Lenient => same_day
                .iter()
                .find(|(_, e)| close(*e))
                .map(|(_, e)| StoreMatch::SameDateAmount { company: e.company.clone() }),
        }
    }
}
