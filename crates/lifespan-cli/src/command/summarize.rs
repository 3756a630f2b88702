//! Cohort summary command

use std::path::PathBuf;

use clap::Args;
use lifespan_core::group_runs;
use lifespan_io::{summary, table};

use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct SummarizeArg {
    /// Path to the scoring-sheet JSON document
    pub document: PathBuf,

    /// Skip artifact cleaning even if the document asks for it
    #[arg(long)]
    pub no_clean: bool,

    /// Write summary rows as JSON to this path instead of printing a table
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SummarizeArg) -> anyhow::Result<()> {
    let doc = util::read_document(&arg.document)?;
    let clean_override = arg.no_clean.then_some(false);
    let series = table::load_series(&doc, clean_override)?;
    eprintln!("Parsed {} cohort series", series.len());

    let cohorts = group_runs(series)?;
    let rows = summary::summary_rows(&cohorts);
    eprintln!("Aggregated {} cohorts", rows.len());

    match &arg.output {
        Some(path) => {
            let mut output = Output::open(path.clone())?;
            output.write_json(&rows)?;
            eprintln!("Summary saved to: {}", output.display_path());
        }
        None => {
            let mut stdout = Output::stdout();
            summary::write_summary_table(&mut stdout, &rows)?;
        }
    }
    Ok(())
}
