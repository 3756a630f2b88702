//! Censoring export command

use std::path::PathBuf;

use clap::Args;
use lifespan_core::group_runs;
use lifespan_io::{export::ExportLayout, table};

use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct ExportArg {
    /// Path to the scoring-sheet JSON document
    pub document: PathBuf,

    /// Skip artifact cleaning even if the document asks for it
    #[arg(long)]
    pub no_clean: bool,

    /// Write the layout as JSON to this path instead of printing a table
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ExportArg) -> anyhow::Result<()> {
    let doc = util::read_document(&arg.document)?;
    let clean_override = arg.no_clean.then_some(false);
    let series = table::load_series(&doc, clean_override)?;
    let cohorts = group_runs(series)?;

    let layout = ExportLayout::from_cohorts(&cohorts);
    for warning in &layout.warnings {
        eprintln!("warning: {warning}");
    }

    match &arg.output {
        Some(path) => {
            let mut output = Output::open(path.clone())?;
            output.write_json(&layout)?;
            eprintln!("Export saved to: {}", output.display_path());
        }
        None => {
            let mut stdout = Output::stdout();
            layout.write_table(&mut stdout)?;
        }
    }
    Ok(())
}
