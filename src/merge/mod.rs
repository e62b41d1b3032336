// src/merge/mod.rs
//! # Merging update files into the store
//!
//! `parse` turns update-file lines into [`RawEntry`] text records. [`merge`]
//! validates them, drops repeats inside the batch, then drops anything the
//! store already holds. Every dropped entry comes back with its reason; the
//! caller decides how to report them.
//!
//! ## Order of checks
//! 1. validation: `incomplete fields`, `non-positive amount`,
//!    `payment before ex-date`
//! 2. within-batch: `duplicate within batch`
//! 3. against the store: `already exists`

pub mod dedup;
pub mod parse;

use std::fmt;

use tracing::{debug, warn};

use crate::config::options::DedupPolicy;
use crate::core::dates;
use crate::model::{HistoricalRecord, RawEntry};
use crate::store::Dataset;
use dedup::{split_batch_duplicates, StoreIndex, StoreMatch};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectReason {
    Incomplete,
    PaymentBeforeEx,
    NonPositiveAmount,
    DuplicateInBatch,
    AlreadyExists,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::Incomplete => "incomplete fields",
            RejectReason::PaymentBeforeEx => "payment before ex-date",
            RejectReason::NonPositiveAmount => "non-positive amount",
            RejectReason::DuplicateInBatch => "duplicate within batch",
            RejectReason::AlreadyExists => "already exists",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rejection {
    pub entry: RawEntry,
    pub reason: RejectReason,
    /// Extra context, e.g. which stored company matched.
    pub detail: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergeOutcome {
    pub accepted: Vec<HistoricalRecord>,
    pub rejected: Vec<Rejection>,
}

impl MergeOutcome {
    pub fn count(&self, reason: RejectReason) -> usize {
        self.rejected.iter().filter(|r| r.reason == reason).count()
    }
}

/// Turn entry text into a record, or say why not.
pub fn validate(e: &RawEntry) -> Result<HistoricalRecord, RejectReason> {
    if e.ex_date.trim().is_empty() || e.amount.trim().is_empty() || e.payment_date.trim().is_empty() {
        return Err(RejectReason::Incomplete);
    }
    let amount = dates::parse_amount(&e.amount).ok_or(RejectReason::Incomplete)?;
    if amount <= 0.0 {
        return Err(RejectReason::NonPositiveAmount);
    }
    let ex_date = dates::parse_date(&e.ex_date).ok_or(RejectReason::Incomplete)?;
    let payment_date = dates::parse_date(&e.payment_date).ok_or(RejectReason::Incomplete)?;
    if payment_date < ex_date {
        return Err(RejectReason::PaymentBeforeEx);
    }

    Ok(HistoricalRecord {
        company: e.company.clone(),
        ex_date,
        payment_date: Some(payment_date),
        payment_text: s!(),
        amount,
        kind: s!(),
        yield_text: e.yield_text.clone(),
    })
}

fn reject(entry: RawEntry, reason: RejectReason, detail: Option<String>) -> Rejection {
    warn!(line = entry.line, company = %entry.company, %reason, "entry rejected");
    Rejection { entry, reason, detail }
}

/// Validate and dedup `incoming` against `existing`. Nothing is mutated.
pub fn merge(
    existing: &[HistoricalRecord],
    incoming: Vec<RawEntry>,
    policy: DedupPolicy,
) -> MergeOutcome {
    let mut rejected = Vec::new();

    let mut valid = Vec::with_capacity(incoming.len());
    for entry in incoming {
        match validate(&entry) {
            Ok(rec) => valid.push((entry, rec)),
            Err(reason) => rejected.push(reject(entry, reason, None)),
        }
    }

    let (unique, repeats) = split_batch_duplicates(valid, |(_, r)| r);
    for (entry, _) in repeats {
        rejected.push(reject(entry, RejectReason::DuplicateInBatch, None));
    }

    let index = StoreIndex::new(existing);
    let mut accepted = Vec::with_capacity(unique.len());
    for (entry, rec) in unique {
        match index.find(&rec, policy) {
            None => {
                debug!(company = %rec.company, ex_date = %rec.ex_date, "entry accepted");
                accepted.push(rec);
            }
            Some(StoreMatch::SameCompany) => {
                rejected.push(reject(entry, RejectReason::AlreadyExists, None));
            }
            Some(StoreMatch::SameDateAmount { company }) => {
                let detail = format!("same date and amount as {company}");
                rejected.push(reject(entry, RejectReason::AlreadyExists, Some(detail)));
            }
        }
    }

    MergeOutcome { accepted, rejected }
}

/// Append accepted records and re-sort the store by ex-date.
pub fn apply(ds: &mut Dataset, accepted: &[HistoricalRecord]) {
    ds.records.extend_from_slice(accepted);
    ds.sort_by_ex_date();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(company: &str, ex: &str, amount: &str, pay: &str) -> RawEntry {
        RawEntry {
            line: 1,
            company: s!(company),
            ex_date: s!(ex),
            amount: s!(amount),
            payment_date: s!(pay),
            yield_text: s!(),
        }
    }

    #[test]
    fn validation_reasons() {
        let cases = [
            (entry("A", "", "1", "01.02.2024"), RejectReason::Incomplete),
            (entry("A", "15.01.2024", "", "01.02.2024"), RejectReason::Incomplete),
            (entry("A", "15.01.2024", "1", ""), RejectReason::Incomplete),
            (entry("A", "15.01.2024", "x", "01.02.2024"), RejectReason::Incomplete),
            (entry("A", "2024-01-15", "1", "01.02.2024"), RejectReason::Incomplete),
            (entry("A", "15.01.2024", "0", "01.02.2024"), RejectReason::NonPositiveAmount),
            (entry("A", "15.01.2024", "-2", "01.02.2024"), RejectReason::NonPositiveAmount),
            (entry("A", "15.01.2024", "1", "01.01.2024"), RejectReason::PaymentBeforeEx),
        ];
        for (e, want) in cases {
            assert_eq!(validate(&e).unwrap_err(), want, "{e:?}");
        }
    }

    #[test]
    fn same_day_payment_is_fine() {
        let r = validate(&entry("A (X)", "15.01.2024", "1.5", "15.01.2024")).unwrap();
        assert_eq!(r.amount, 1.5);
        assert_eq!(r.payment_date, Some(r.ex_date));
    }

    #[test]
    fn reason_strings() {
        assert_eq!(RejectReason::PaymentBeforeEx.to_string(), "payment before ex-date");
        assert_eq!(RejectReason::AlreadyExists.to_string(), "already exists");
    }
}
