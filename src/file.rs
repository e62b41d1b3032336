// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use chrono::NaiveDateTime;

use crate::config::consts::*;
use crate::error::{Error, Result};

fn has_ext(p: &Path, ext: &str) -> bool {
    p.extension().and_then(|s| s.to_str()).is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn file_name(p: &Path) -> &str {
    p.file_name().and_then(|s| s.to_str()).unwrap_or("")
}

/// Regular files in `dir` with the given extension, sorted by name.
pub fn files_with_ext(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let rd = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    for entry in rd {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if path.is_file() && has_ext(&path, ext) {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

fn mtime(p: &Path) -> SystemTime {
    fs::metadata(p).and_then(|m| m.modified()).unwrap_or(SystemTime::UNIX_EPOCH)
}

/// Most recently modified candidate accepted by `keep`.
pub fn latest_matching(candidates: &[PathBuf], keep: impl Fn(&str) -> bool) -> Option<PathBuf> {
    candidates
        .iter()
        .filter(|p| keep(file_name(p)))
        .max_by_key(|p| mtime(p))
        .cloned()
}

fn is_prediction_output(name: &str) -> bool {
    name.starts_with(OUTPUT_PREFIX)
}

/// Explicit path must exist; otherwise discover the newest store in `dir`.
/// With `allow_any`, any CSV that is not one of our own outputs will do
/// when no file carries the store hint.
pub fn resolve_store(dir: &Path, explicit: Option<&Path>, allow_any: bool) -> Result<PathBuf> {
    if let Some(p) = explicit {
        return if p.is_file() { Ok(p.to_path_buf()) } else { Err(Error::MissingFile(p.to_path_buf())) };
    }
    let csvs = files_with_ext(dir, STORE_EXT)?;
    latest_matching(&csvs, |n| n.contains(STORE_HINT))
        .or_else(|| allow_any.then(|| latest_matching(&csvs, |n| !is_prediction_output(n))).flatten())
        .ok_or_else(|| Error::InputNotFound { what: "dividend store (.csv)", dir: dir.to_path_buf() })
}

/// Explicit path must exist; otherwise the newest `*Update*.md`, falling back
/// to any `.md` whose name mentions "update" in any case.
pub fn resolve_updates(dir: &Path, explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = explicit {
        return if p.is_file() { Ok(p.to_path_buf()) } else { Err(Error::MissingFile(p.to_path_buf())) };
    }
    let mds = files_with_ext(dir, UPDATE_EXT)?;
    let hint = UPDATE_HINT.to_lowercase();
    latest_matching(&mds, |n| n.contains(UPDATE_HINT))
        .or_else(|| latest_matching(&mds, |n| n.to_lowercase().contains(&hint)))
        .ok_or_else(|| Error::InputNotFound { what: "update file (.md)", dir: dir.to_path_buf() })
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inputs {
    pub md: Vec<PathBuf>,
    pub csv: Vec<PathBuf>,
}

pub fn list_inputs(dir: &Path) -> Result<Inputs> {
    Ok(Inputs {
        md: files_with_ext(dir, UPDATE_EXT)?,
        csv: files_with_ext(dir, STORE_EXT)?,
    })
}

/// `<dir>/predicted_dividends_YYYY_MM_DD_HHMM.csv`
pub fn prediction_output_path(dir: &Path, now: NaiveDateTime) -> PathBuf {
    let stamp = now.format(OUTPUT_TIMESTAMP_FORMAT).to_string();
    dir.join(join!(OUTPUT_PREFIX, &stamp, ".", STORE_EXT))
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::io(
            dir,
            std::io::Error::other(format!("path exists but is not a directory: {}", dir.display())),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?; }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn output_name_embeds_timestamp() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 5, 0).unwrap();
        let p = prediction_output_path(Path::new("out"), now);
        assert_eq!(p, Path::new("out").join("predicted_dividends_2024_03_01_0905.csv"));
    }

    #[test]
    fn discovery_prefers_hinted_files() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path();
        fs::write(d.join("other.csv"), "x").unwrap();
        fs::write(d.join("Historical_Dividend_2025.csv"), "x").unwrap();
        fs::write(d.join("notes.md"), "x").unwrap();
        fs::write(d.join("weekly_update.md"), "x").unwrap();

        let store = resolve_store(d, None, true).unwrap();
        assert_eq!(file_name(&store), "Historical_Dividend_2025.csv");
        let upd = resolve_updates(d, None).unwrap();
        assert_eq!(file_name(&upd), "weekly_update.md");
    }

    #[test]
    fn fallback_skips_prediction_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path();
        fs::write(d.join("predicted_dividends_2024_01_01_0000.csv"), "x").unwrap();
        assert!(matches!(resolve_store(d, None, true), Err(Error::InputNotFound { .. })));
        fs::write(d.join("mine.csv"), "x").unwrap();
        assert_eq!(file_name(&resolve_store(d, None, true).unwrap()), "mine.csv");
        assert!(resolve_store(d, None, false).is_err());
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        assert!(matches!(resolve_store(dir.path(), Some(missing.as_path()), true), Err(Error::MissingFile(_))));
    }
}
