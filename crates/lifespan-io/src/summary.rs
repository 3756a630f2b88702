//! Summary sink: one row per aggregate cohort.

use std::io::{self, Write};

use lifespan_core::AggregateCohort;
use serde::Serialize;

/// One summarizer output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub identifier: String,
    /// Pooled effective sample size.
    pub n: u32,
    /// Artifact individuals removed across the cohort's members.
    pub cleaned: u32,
    /// Median survival day; `None` when more than half the cohort
    /// outlived the record.
    pub median: Option<f64>,
}

impl SummaryRow {
    #[must_use]
    pub fn from_cohort(cohort: &AggregateCohort) -> Self {
        Self {
            identifier: cohort.identifier.clone(),
            n: cohort.sample_size,
            cleaned: cohort.cleaned_total,
            median: cohort.median,
        }
    }
}

/// Builds summary rows for a slice of cohorts, in order.
#[must_use]
pub fn summary_rows(cohorts: &[AggregateCohort]) -> Vec<SummaryRow> {
    cohorts.iter().map(SummaryRow::from_cohort).collect()
}

/// Writes rows as a flat comma-separated table with a header line.
///
/// An undefined median is written as the literal `undefined`, never as a
/// number: day 0 is a valid median, so no numeric sentinel can stand in
/// for "no crossing found".
///
/// # Errors
///
/// Propagates I/O errors from `writer`.
pub fn write_summary_table<W>(writer: &mut W, rows: &[SummaryRow]) -> io::Result<()>
where
    W: Write,
{
    writeln!(writer, "name,n,cleaned,median")?;
    for row in rows {
        let median = row
            .median
            .map_or_else(|| "undefined".to_owned(), |m| m.to_string());
        writeln!(writer, "{},{},{},{}", row.identifier, row.n, row.cleaned, median)?;
    }
    Ok(())
}
