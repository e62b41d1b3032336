// src/report.rs
//
// Prediction artifact (CSV) and plain-text renderings for the console.

use std::{
    fmt::Write as _,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use crate::config::consts::COL_COMPANY;
use crate::core::dates;
use crate::csv::BOM;
use crate::error::{Error, Result};
use crate::merge::{MergeOutcome, RejectReason};
use crate::model::Prediction;

#[derive(Serialize)]
struct PredictionRow<'a> {
    #[serde(rename = "חברה")]
    company: &'a str,
    predicted_ex_date: String,
    days_until: i64,
    frequency: usize,
    last_occurrence: i32,
    avg_dividend: f64,
    confidence: f64,
    pattern_years: String,
}

impl<'a> From<&'a Prediction> for PredictionRow<'a> {
    fn from(p: &'a Prediction) -> Self {
        Self {
            company: &p.company,
            predicted_ex_date: dates::format_date(p.predicted_date),
            days_until: p.days_until,
            frequency: p.frequency,
            last_occurrence: p.last_occurrence,
            avg_dividend: p.avg_dividend,
            confidence: p.confidence,
            pattern_years: years_list(&p.pattern_years),
        }
    }
}

pub fn years_list(years: &[i32]) -> String {
    years.iter().map(i32::to_string).collect::<Vec<_>>().join(", ")
}

/// Header row of the artifact, in column order.
pub fn prediction_headers() -> [&'static str; 8] {
    [
        COL_COMPANY, "predicted_ex_date", "days_until", "frequency",
        "last_occurrence", "avg_dividend", "confidence", "pattern_years",
    ]
}

pub fn write_predictions_to<W: Write>(mut w: W, preds: &[Prediction]) -> Result<()> {
    w.write_all(BOM.as_bytes()).map_err(::csv::Error::from)?;
    let mut wtr = ::csv::Writer::from_writer(w);
    if preds.is_empty() {
        wtr.write_record(prediction_headers())?;
    }
    for p in preds {
        wtr.serialize(PredictionRow::from(p))?;
    }
    wtr.flush().map_err(::csv::Error::from)?;
    Ok(())
}

pub fn write_predictions(path: &Path, preds: &[Prediction]) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    write_predictions_to(BufWriter::new(file), preds)
}

/* ---------------- Console ---------------- */

pub fn render_predictions(preds: &[Prediction], horizon_days: u32) -> String {
    let mut out = s!();
    let rule = "=".repeat(80);
    let _ = writeln!(out, "=== PREDICTED DIVIDEND ANNOUNCEMENTS (next {horizon_days} days) ===");
    let _ = writeln!(out, "Based on historical patterns, excluding companies with recent announcements");
    let _ = writeln!(out, "{rule}");

    if preds.is_empty() {
        let _ = writeln!(out, "No dividend announcements predicted based on historical patterns.");
        return out;
    }

    let _ = writeln!(out, "Likely upcoming announcements ({}):", preds.len());
    for (i, p) in preds.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, p.company);
        let _ = writeln!(out, "   Predicted ex-date:  {} ({} days)", dates::format_date(p.predicted_date), p.days_until);
        let _ = writeln!(out, "   Avg dividend:       {:.4}", p.avg_dividend);
        let _ = writeln!(out, "   Pattern frequency:  {} times", p.frequency);
        let _ = writeln!(out, "   Confidence:         {:.1}%", p.confidence);
        let _ = writeln!(out, "   Last occurrence:    {}", p.last_occurrence);
        let _ = writeln!(out, "   Pattern years:      {}", years_list(&p.pattern_years));
    }
    out
}

pub fn render_merge_summary(outcome: &MergeOutcome, parsed: usize) -> String {
    let mut out = s!();
    let _ = writeln!(out, "Processing summary:");
    let _ = writeln!(out, "- Entries found in update file: {parsed}");

    let in_batch = outcome.count(RejectReason::DuplicateInBatch);
    let existing = outcome.count(RejectReason::AlreadyExists);
    let invalid = outcome.rejected.len() - in_batch - existing;
    if in_batch > 0 { let _ = writeln!(out, "- Duplicates within update file: {in_batch}"); }
    if existing > 0 { let _ = writeln!(out, "- Already in store: {existing}"); }
    if invalid > 0 { let _ = writeln!(out, "- Invalid entries: {invalid}"); }
    let _ = writeln!(out, "- New entries added: {}", outcome.accepted.len());

    if !outcome.rejected.is_empty() {
        let _ = writeln!(out, "\nSkipped entries:");
        for r in &outcome.rejected {
            let e = &r.entry;
            let _ = write!(out, "- line {}: {} on {} ({}): {}", e.line, e.company, e.ex_date, e.amount, r.reason);
            if let Some(d) = &r.detail { let _ = write!(out, " [{d}]"); }
            out.push('\n');
        }
    }

    if !outcome.accepted.is_empty() {
        let _ = writeln!(out, "\nNew entries:");
        for a in &outcome.accepted {
            let _ = writeln!(
                out, "- {}: {}, {}",
                a.company, dates::format_date(a.ex_date), dates::format_amount(a.amount)
            );
        }
    }
    out
}
