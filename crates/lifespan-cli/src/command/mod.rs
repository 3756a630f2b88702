use clap::{Parser, Subcommand};

use self::{check::CheckArg, export::ExportArg, summarize::SummarizeArg};

mod check;
mod export;
mod summarize;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Summarize cohorts: sample size, cleaned count, median survival
    Summarize(#[clap(flatten)] SummarizeArg),
    /// Export censoring-style (day, event) columns for survival tools
    Export(#[clap(flatten)] ExportArg),
    /// Check raw data for entry anomalies without cleaning
    Check(#[clap(flatten)] CheckArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Summarize(arg) => summarize::run(&arg)?,
        Mode::Export(arg) => export::run(&arg)?,
        Mode::Check(arg) => check::run(&arg)?,
    }
    Ok(())
}
