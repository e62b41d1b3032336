// src/cli.rs
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::config::consts::{DEFAULT_HORIZON_DAYS, DEFAULT_MIN_FREQUENCY};
use crate::config::options::{DedupPolicy, FixNamesOptions, PredictOptions, UpdateOptions};
use crate::core::dates;
use crate::progress::Progress;
use crate::{file, report, runner};

#[derive(Debug, Parser)]
#[command(name = "tase_dividends", version)]
#[command(about = "Merge dividend announcements and predict upcoming ex-dates")]
#[command(after_long_help = include_str!("cli_help.txt"))]
pub struct Cli {
    /// Directory to search for input files
    #[arg(short = 'C', long = "dir", global = true, default_value = ".")]
    pub dir: PathBuf,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict upcoming ex-dividend dates from recurring patterns
    Predict(PredictArgs),
    /// Merge a markdown update file into the store
    Update(UpdateArgs),
    /// Rewrite markdown-formatted company names in the store
    FixNames(FixNamesArgs),
    /// List available .md and .csv inputs
    List,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Store CSV (newest *Historical_Dividend*.csv when omitted)
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Days ahead to predict
    #[arg(long, default_value_t = DEFAULT_HORIZON_DAYS)]
    pub days: u32,

    /// Minimum records for a company to be considered
    #[arg(long, default_value_t = DEFAULT_MIN_FREQUENCY)]
    pub min_frequency: usize,

    /// Directory for the predictions file
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Reference date (DD.MM.YYYY); defaults to today
    #[arg(long, value_parser = parse_cli_date)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Store CSV to update
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Markdown update file (newest *Update*.md when omitted)
    #[arg(long)]
    pub md: Option<PathBuf>,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Only treat same-date, same-amount rows as duplicates when the company matches too
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct FixNamesArgs {
    #[arg(long)]
    pub csv: Option<PathBuf>,

    #[arg(long)]
    pub dry_run: bool,
}

fn parse_cli_date(s: &str) -> Result<NaiveDate, String> {
    dates::parse_date(s).ok_or_else(|| format!("expected DD.MM.YYYY, got '{s}'"))
}

/// Prints run milestones to stdout.
struct Console;

impl Progress for Console {
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
}

pub fn run(cli: Cli) -> Result<(), crate::Error> {
    let dir = cli.dir;
    let mut console = Console;

    match cli.command {
        Command::List => {
            let inputs = file::list_inputs(&dir)?;
            println!("Available files in {}:", dir.display());
            println!("MD files:");
            for f in &inputs.md { println!("  - {}", f.display()); }
            println!("CSV files:");
            for f in &inputs.csv { println!("  - {}", f.display()); }
        }

        Command::Predict(a) => {
            let opts = PredictOptions {
                input: a.csv,
                dir,
                output_dir: a.out,
                horizon_days: a.days,
                min_frequency: a.min_frequency,
                today: a.today,
            };
            let summary = runner::run_predict(&opts, Some(&mut console))?;
            if !summary.skipped.is_empty() {
                println!("Skipped {} malformed rows (see log with -v)", summary.skipped.len());
            }
            println!();
            print!("{}", report::render_predictions(&summary.predictions, opts.horizon_days));
        }

        Command::Update(a) => {
            let opts = UpdateOptions {
                store: a.csv,
                entries: a.md,
                dir,
                dry_run: a.dry_run,
                dedup: if a.strict { DedupPolicy::Strict } else { DedupPolicy::Lenient },
            };
            let summary = runner::run_update(&opts, Some(&mut console))?;
            println!();
            print!("{}", report::render_merge_summary(&summary.outcome, summary.parsed));
            if opts.dry_run && !summary.outcome.accepted.is_empty() {
                println!("\nDry run: store not written.");
            }
        }

        Command::FixNames(a) => {
            let opts = FixNamesOptions { store: a.csv, dir, dry_run: a.dry_run };
            let summary = runner::run_fix_names(&opts, Some(&mut console))?;
            for (before, after) in &summary.changes {
                println!("Fixing: '{before}' -> '{after}'");
            }
            println!("Total changes: {}", summary.changes.len());
            if summary.written {
                println!("Store saved: {}", summary.store.display());
            } else if summary.changes.is_empty() {
                println!("No changes were needed.");
            }
        }
    }

    Ok(())
}
