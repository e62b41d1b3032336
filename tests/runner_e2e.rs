// tests/runner_e2e.rs
//
// Whole runs against files in a temp directory.

mod common;

use std::fs;
use std::path::Path;

use common::{d, md_row, STORE_HEADER};
use tase_dividends::config::options::{FixNamesOptions, PredictOptions, UpdateOptions};
use tase_dividends::progress::Progress;
use tase_dividends::{runner, store, Error};

const STORE_NAME: &str = "Historical_Dividend_Announcements_TA125.csv";

fn write_store(dir: &Path, rows: &str) {
    let text = format!("\u{feff}{STORE_HEADER},,,,,,\n{rows}");
    fs::write(dir.join(STORE_NAME), text).unwrap();
}

#[derive(Default)]
struct Recorder {
    lines: Vec<String>,
    finished: usize,
}

impl Progress for Recorder {
    fn log(&mut self, msg: &str) {
        self.lines.push(msg.to_string());
    }

    fn finish(&mut self) {
        self.finished += 1;
    }
}

#[test]
fn predict_writes_timestamped_artifact() {
    let dir = tempfile::tempdir().unwrap();
    write_store(
        dir.path(),
        "Alpha (ALP),15.03.2022,1,,25.03.2022,,2022-03-15\n\
         Alpha (ALP),15.03.2023,1.2,,25.03.2023,,2023-03-15\n\
         Broken,someday,1,,,,\n",
    );

    let opts = PredictOptions {
        dir: dir.path().to_path_buf(),
        today: Some(d("01.03.2024")),
        ..Default::default()
    };
    let now = d("01.03.2024").and_hms_opt(8, 30, 0).unwrap();
    let mut rec = Recorder::default();
    let summary = runner::run_predict_at(&opts, now, Some(&mut rec)).unwrap();

    assert_eq!(summary.records, 2);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.companies, 1);
    assert_eq!(summary.predictions.len(), 1);
    assert!(rec.lines[0].starts_with("Reading data from"));
    assert_eq!(rec.finished, 1);

    let out = summary.output.unwrap();
    assert_eq!(out.file_name().unwrap(), "predicted_dividends_2024_03_01_0830.csv");
    let text = fs::read_to_string(&out).unwrap();
    let text = text.trim_start_matches('\u{feff}');
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "חברה,predicted_ex_date,days_until,frequency,last_occurrence,avg_dividend,confidence,pattern_years"
    );
    assert_eq!(lines.next().unwrap(), "Alpha (ALP),15.03.2024,14,2,2023,1.1,58.0,\"2022, 2023\"");
}

#[test]
fn predict_without_matches_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_store(dir.path(), "Alpha (ALP),15.03.2023,1,,25.03.2023,,2023-03-15\n");
    let opts = PredictOptions {
        dir: dir.path().to_path_buf(),
        today: Some(d("01.03.2024")),
        ..Default::default()
    };
    let summary = runner::run_predict(&opts, None).unwrap();
    assert!(summary.predictions.is_empty());
    assert!(summary.output.is_none());
}

#[test]
fn predict_without_store_is_input_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let opts = PredictOptions { dir: dir.path().to_path_buf(), ..Default::default() };
    let mut rec = Recorder::default();
    let err = runner::run_predict(&opts, Some(&mut rec)).unwrap_err();
    assert!(matches!(err, Error::InputNotFound { .. }));
    assert_eq!(rec.finished, 1);
}

#[test]
fn update_appends_sorts_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    write_store(
        dir.path(),
        "Alpha (ALP),15.03.2023,1.2,,25.03.2023,,2023-03-15\n\
         Alpha (ALP),15.09.2023,0.8,רגיל,25.09.2023,2%,2023-09-15\n",
    );
    let md = format!(
        "# Weekly Update\n\n| |חברה|יום אקס|דיבידנד|סוג|תשלום|תשואה|\n|---|---|---|---|---|---|---|\n{}{}{}",
        md_row("**Beta** ([BET](https://x))", "01.06.2023", "0.5", "10.06.2023"),
        md_row("Alpha (ALP)", "15.03.2023", "1.2", "25.03.2023"),
        md_row("Gamma (GAM)", "10.07.2023", "0.2", "01.07.2023"),
    );
    fs::write(dir.path().join("Update_2023_06.md"), md).unwrap();

    let opts = UpdateOptions { dir: dir.path().to_path_buf(), ..Default::default() };
    let first = runner::run_update(&opts, None).unwrap();
    assert_eq!(first.parsed, 3);
    assert_eq!(first.outcome.accepted.len(), 1);
    assert_eq!(first.outcome.rejected.len(), 2);
    assert!(first.written);

    let ds = store::load(&dir.path().join(STORE_NAME)).unwrap();
    assert!(ds.blank_lead);
    let order: Vec<_> = ds.records.iter().map(|r| (r.company.as_str(), r.ex_date)).collect();
    assert_eq!(
        order,
        vec![
            ("Alpha (ALP)", d("15.03.2023")),
            ("Beta (BET)", d("01.06.2023")),
            ("Alpha (ALP)", d("15.09.2023")),
        ]
    );
    // untouched columns survive the rewrite
    assert_eq!(ds.records[2].kind, "רגיל");
    assert_eq!(ds.records[2].yield_text, "2%");

    let second = runner::run_update(&opts, None).unwrap();
    assert!(second.outcome.accepted.is_empty());
    assert!(!second.written);
}

#[test]
fn dry_run_leaves_store_alone() {
    let dir = tempfile::tempdir().unwrap();
    write_store(dir.path(), "Alpha (ALP),15.03.2023,1.2,,25.03.2023,,2023-03-15\n");
    let before = fs::read(dir.path().join(STORE_NAME)).unwrap();
    fs::write(
        dir.path().join("update.md"),
        md_row("Beta (BET)", "01.06.2023", "0.5", "10.06.2023"),
    )
    .unwrap();

    let opts = UpdateOptions { dir: dir.path().to_path_buf(), dry_run: true, ..Default::default() };
    let summary = runner::run_update(&opts, None).unwrap();
    assert_eq!(summary.outcome.accepted.len(), 1);
    assert!(!summary.written);
    assert_eq!(fs::read(dir.path().join(STORE_NAME)).unwrap(), before);
}

#[test]
fn fix_names_rewrites_markdown_cells_only() {
    let dir = tempfile::tempdir().unwrap();
    write_store(
        dir.path(),
        "\"**Alpha** ([ALP](https://x))\",15.03.2023,1.2,,25.03.2023,,2023-03-15\n\
         Beta  (BET),16.03.2023,1,,25.03.2023,,2023-03-16\n",
    );
    let opts = FixNamesOptions { dir: dir.path().to_path_buf(), ..Default::default() };
    let summary = runner::run_fix_names(&opts, None).unwrap();
    assert_eq!(summary.changes, vec![("**Alpha** ([ALP](https://x))".to_string(), "Alpha (ALP)".to_string())]);
    assert!(summary.written);

    let ds = store::load(&dir.path().join(STORE_NAME)).unwrap();
    assert_eq!(ds.records[0].company, "Alpha (ALP)");
    assert_eq!(ds.records[1].company, "Beta  (BET)");
}
