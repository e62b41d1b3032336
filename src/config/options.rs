// src/config/options.rs
use std::path::PathBuf;

use chrono::NaiveDate;

use super::consts::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DedupPolicy {
    /// Same ex-date and amount rejects even when the names differ.
    #[default]
    Lenient,
    /// Normalized names must match as well.
    Strict,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PredictOptions {
    /// Store file; discovered in `dir` when None.
    pub input: Option<PathBuf>,
    /// Where to look for inputs and write the artifact.
    pub dir: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub horizon_days: u32,
    pub min_frequency: usize,
    /// Reference date; the local clock when None.
    pub today: Option<NaiveDate>,
}

impl Default for PredictOptions {
    fn default() -> Self {
        Self {
            input: None,
            dir: PathBuf::from("."),
            output_dir: None,
            horizon_days: DEFAULT_HORIZON_DAYS,
            min_frequency: DEFAULT_MIN_FREQUENCY,
            today: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateOptions {
    pub store: Option<PathBuf>,
    pub entries: Option<PathBuf>,
    pub dir: PathBuf,
    pub dry_run: bool,
    pub dedup: DedupPolicy,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            store: None,
            entries: None,
            dir: PathBuf::from("."),
            dry_run: false,
            dedup: DedupPolicy::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FixNamesOptions {
    pub store: Option<PathBuf>,
    pub dir: PathBuf,
    pub dry_run: bool,
}

impl Default for FixNamesOptions {
    fn default() -> Self {
        Self { store: None, dir: PathBuf::from("."), dry_run: false }
    }
}
