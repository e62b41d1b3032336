// src/bin/cli.rs
use clap::Parser;
use color_eyre::eyre::WrapErr;
use tase_dividends::{cli, log};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = cli::Cli::parse();
    log::init(args.verbose);

    cli::run(args).wrap_err("dividend run failed")
}
