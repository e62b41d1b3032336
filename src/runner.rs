// src/runner.rs
//
// End-to-end runs behind the CLI. Each run reads the store once and writes at
// most one file at the end; nothing is written when a step fails.

use std::{fs, path::PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::info;

use crate::{
    config::options::{FixNamesOptions, PredictOptions, UpdateOptions},
    core::sanitize::{canonical_company, has_markdown},
    error::{Error, Result},
    file,
    merge::{self, parse::parse_entries, MergeOutcome},
    model::Prediction,
    pattern::mine_patterns,
    predict::predict,
    progress::Progress,
    store::{self, SkippedRow},
};

fn say(progress: &mut Option<&mut dyn Progress>, msg: &str) {
    if let Some(p) = progress.as_deref_mut() {
        p.log(msg);
    }
}

/// Run `body`, then signal `finish` whether it succeeded or not.
fn finished<T>(
    mut progress: Option<&mut dyn Progress>,
    body: impl FnOnce(&mut Option<&mut dyn Progress>) -> Result<T>,
) -> Result<T> {
    let res = body(&mut progress);
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    res
}

/* ---------------- Predict ---------------- */

#[derive(Clone, Debug)]
pub struct PredictSummary {
    pub input: PathBuf,
    pub today: NaiveDate,
    pub records: usize,
    pub skipped: Vec<SkippedRow>,
    /// Companies with at least one recurring slot.
    pub companies: usize,
    pub predictions: Vec<Prediction>,
    /// None when there was nothing to save.
    pub output: Option<PathBuf>,
}

pub fn run_predict(opts: &PredictOptions, progress: Option<&mut dyn Progress>) -> Result<PredictSummary> {
    run_predict_at(opts, Local::now().naive_local(), progress)
}

/// `now` stamps the artifact name and, absent `opts.today`, sets today.
pub fn run_predict_at(
    opts: &PredictOptions,
    now: NaiveDateTime,
    progress: Option<&mut dyn Progress>,
) -> Result<PredictSummary> {
    finished(progress, |progress| predict_at(opts, now, progress))
}

fn predict_at(
    opts: &PredictOptions,
    now: NaiveDateTime,
    progress: &mut Option<&mut dyn Progress>,
) -> Result<PredictSummary> {
    let today = opts.today.unwrap_or(now.date());
    let input = file::resolve_store(&opts.dir, opts.input.as_deref(), true)?;
    say(progress, &format!("Reading data from: {}", input.display()));

    let ds = store::load(&input)?;
    info!(records = ds.records.len(), skipped = ds.skipped.len(), "store loaded");

    let patterns = mine_patterns(&ds.records, opts.min_frequency, today);
    say(progress, &format!("Found patterns for {} companies", patterns.len()));

    let predictions = predict(&patterns, opts.horizon_days, today);
    info!(predictions = predictions.len(), %today, horizon = opts.horizon_days, "prediction done");

    let output = if predictions.is_empty() {
        say(progress, "No predictions to save.");
        None
    } else {
        let dir = opts.output_dir.clone().unwrap_or_else(|| opts.dir.clone());
        file::ensure_directory(&dir)?;
        let path = file::prediction_output_path(&dir, now);
        crate::report::write_predictions(&path, &predictions)?;
        say(progress, &format!("Predicted announcements saved to: {}", path.display()));
        Some(path)
    };

    Ok(PredictSummary {
        input,
        today,
        records: ds.records.len(),
        skipped: ds.skipped,
        companies: patterns.len(),
        predictions,
        output,
    })
}

/* ---------------- Update ---------------- */

#[derive(Clone, Debug)]
pub struct UpdateSummary {
    pub store: PathBuf,
    pub entries: PathBuf,
    /// Announcement rows found in the update file.
    pub parsed: usize,
    pub outcome: MergeOutcome,
    pub skipped: Vec<SkippedRow>,
    pub written: bool,
}

pub fn run_update(opts: &UpdateOptions, progress: Option<&mut dyn Progress>) -> Result<UpdateSummary> {
    finished(progress, |progress| update(opts, progress))
}

fn update(opts: &UpdateOptions, progress: &mut Option<&mut dyn Progress>) -> Result<UpdateSummary> {
    let store_path = file::resolve_store(&opts.dir, opts.store.as_deref(), false)?;
    let entries_path = file::resolve_updates(&opts.dir, opts.entries.as_deref())?;
    say(progress, &format!("Using store: {}", store_path.display()));
    say(progress, &format!("Using update file: {}", entries_path.display()));

    let mut ds = store::load(&store_path)?;
    let text = fs::read_to_string(&entries_path).map_err(|e| Error::io(&entries_path, e))?;
    let incoming = parse_entries(&text);
    let parsed = incoming.len();
    info!(parsed, file = %entries_path.display(), "update file parsed");

    let outcome = merge::merge(&ds.records, incoming, opts.dedup);

    let written = !outcome.accepted.is_empty() && !opts.dry_run;
    if written {
        merge::apply(&mut ds, &outcome.accepted);
        store::save(&store_path, &ds)?;
        info!(added = outcome.accepted.len(), store = %store_path.display(), "store updated");
    }

    Ok(UpdateSummary {
        store: store_path,
        entries: entries_path,
        parsed,
        outcome,
        skipped: ds.skipped,
        written,
    })
}

/* ---------------- Fix names ---------------- */

#[derive(Clone, Debug)]
pub struct FixNamesSummary {
    pub store: PathBuf,
    /// (before, after) per changed row.
    pub changes: Vec<(String, String)>,
    pub written: bool,
}

/// Rewrite company cells still carrying markdown into `Name (CODE)`.
pub fn run_fix_names(opts: &FixNamesOptions, progress: Option<&mut dyn Progress>) -> Result<FixNamesSummary> {
    finished(progress, |progress| fix_names(opts, progress))
}

fn fix_names(opts: &FixNamesOptions, progress: &mut Option<&mut dyn Progress>) -> Result<FixNamesSummary> {
    let store_path = file::resolve_store(&opts.dir, opts.store.as_deref(), false)?;
    say(progress, &format!("Reading store: {}", store_path.display()));

    let mut ds = store::load(&store_path)?;
    let mut changes = Vec::new();
    for r in ds.records.iter_mut().filter(|r| has_markdown(&r.company)) {
        let fixed = canonical_company(&r.company);
        if fixed != r.company {
            changes.push((std::mem::replace(&mut r.company, fixed.clone()), fixed));
        }
    }

    let written = !changes.is_empty() && !opts.dry_run;
    if written {
        store::save(&store_path, &ds)?;
        info!(changed = changes.len(), store = %store_path.display(), "company names fixed");
    }

    Ok(FixNamesSummary { store: store_path, changes, written })
}
