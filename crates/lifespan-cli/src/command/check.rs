//! Anomaly check command

use std::path::PathBuf;

use clap::Args;
use lifespan_core::find_anomalies;
use lifespan_io::{anomaly_report, table};

use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct CheckArg {
    /// Path to the scoring-sheet JSON document
    pub document: PathBuf,

    /// Write markers as JSON to this path instead of printing a report
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CheckArg) -> anyhow::Result<()> {
    let doc = util::read_document(&arg.document)?;
    // Cleaning rewrites the very counts the detector inspects, so the
    // check always runs on raw series.
    let series = table::load_series(&doc, Some(false))?;

    let anomalies = find_anomalies(&series);
    let markers = anomaly_report::markers(&anomalies, doc.params.day_zero_column);

    if markers.is_empty() {
        eprintln!("No anomalies found in {} series", series.len());
        return Ok(());
    }
    eprintln!(
        "Found {} anomalies in {} series",
        markers.len(),
        series.len()
    );

    match &arg.output {
        Some(path) => {
            let mut output = Output::open(path.clone())?;
            output.write_json(&markers)?;
            eprintln!("Markers saved to: {}", output.display_path());
        }
        None => {
            let mut stdout = Output::stdout();
            anomaly_report::write_report(&mut stdout, &markers)?;
        }
    }
    Ok(())
}
