//! Tabular data source: rectangular cell matrix to cohort series.
//!
//! Mirrors the scoring-sheet layout the assays are entered in: a name
//! column with fill-down semantics, a day-zero pair (start date, total
//! individuals), then repeated (date, dead, alive) triples, one per
//! scoring session. Parsing is lenient by design: partially scored rows
//! are expected lab conditions, so ill-typed cells are skipped rather
//! than escalated.

use lifespan_core::{CohortSeries, Observation, cleaner, series::NoDataError};
use serde::{Deserialize, Serialize};

use crate::cell::Cell;

/// Identifier used for rows that precede the first non-empty name cell.
const UNNAMED: &str = "Undefined";

/// Column offset from the day-zero column to the first scored triple.
const FIRST_TRIPLE_OFFSET: usize = 2;

/// Cells per scored triple: (date, dead, alive).
const TRIPLE_STRIDE: usize = 3;

/// Parse parameters for a [`SheetDocument`].
///
/// All row and column indices are 0-based into
/// [`rows`](SheetDocument::rows).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SheetParams {
    /// First data row to read, inclusive.
    pub start_row: usize,
    /// Last data row to read, inclusive.
    pub end_row: usize,
    /// Column holding cohort identifiers, filled down across rows.
    pub name_column: usize,
    /// Column holding each row's start date; the cell to its right holds
    /// the total number of individuals at day zero.
    pub day_zero_column: usize,
    /// Whether parsed series should be run through the cleaner.
    /// Callers can override this per invocation.
    #[serde(default = "default_clean")]
    pub clean: bool,
}

const fn default_clean() -> bool {
    true
}

/// A rectangular table of cells plus the parameters to read it with.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SheetDocument {
    pub params: SheetParams,
    pub rows: Vec<Vec<Cell>>,
}

/// The document cannot be read at all (as opposed to individual cells,
/// which are skipped leniently).
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ParseError {
    /// The configured row range points outside the table.
    #[display("row range {start_row}..={end_row} exceeds the {rows} data rows")]
    RowRange {
        start_row: usize,
        end_row: usize,
        rows: usize,
    },
    /// A parsed row produced a series without a day-0 anchor.
    #[display("row {row}: {source}")]
    Series { row: usize, source: NoDataError },
}

/// Parses the configured row range of `doc` into cohort series, without
/// cleaning.
///
/// Per row:
///
/// - the identifier is the nearest prior non-blank name cell (fill-down);
///   rows before any name are labeled `Undefined`
/// - the row yields a series only if its day-zero pair is well typed: a
///   date at the day-zero column and a count in the next cell; other rows
///   are skipped entirely
/// - scored triples (date, dead, alive) follow two cells after the
///   day-zero column, three cells apart; any triple that is not
///   (date, count, count) is skipped, as is one whose date precedes the
///   start date
/// - the day index is the whole-day difference from the start date;
///   duplicate days are kept, to be reported by anomaly detection
///
/// # Errors
///
/// Returns [`ParseError::RowRange`] if the configured range does not fit
/// the table.
pub fn parse_document(doc: &SheetDocument) -> Result<Vec<CohortSeries>, ParseError> {
    let params = &doc.params;
    if params.start_row > params.end_row || params.end_row >= doc.rows.len() {
        return Err(ParseError::RowRange {
            start_row: params.start_row,
            end_row: params.end_row,
            rows: doc.rows.len(),
        });
    }

    let mut series = Vec::new();
    let mut name = UNNAMED.to_owned();
    for row_index in params.start_row..=params.end_row {
        let row = &doc.rows[row_index];
        if let Some(cell_name) = row.get(params.name_column).and_then(Cell::display_name) {
            name = cell_name;
        }

        let Some(observations) = parse_row(row, params.day_zero_column) else {
            continue;
        };
        let parsed = CohortSeries::new(observations, name.clone(), row_index)
            .map_err(|source| ParseError::Series {
                row: row_index,
                source,
            })?;
        series.push(parsed);
    }
    Ok(series)
}

/// Parses one row's observations, or `None` if the day-zero pair is
/// missing or ill typed.
fn parse_row(row: &[Cell], day_zero_column: usize) -> Option<Vec<Observation>> {
    let start_date = row.get(day_zero_column)?.as_date()?;
    let total = row.get(day_zero_column + 1)?.as_count()?;

    let mut observations = vec![Observation::new(0, total, 0, start_date)];
    let mut column = day_zero_column + FIRST_TRIPLE_OFFSET;
    while column + TRIPLE_STRIDE <= row.len() {
        let triple = (
            row[column].as_date(),
            row[column + 1].as_count(),
            row[column + 2].as_count(),
        );
        if let (Some(date), Some(dead), Some(alive)) = triple {
            let day = (date - start_date).num_days();
            // A date before the start computes a negative day; treat it
            // as one more malformed entry.
            if let Ok(day) = usize::try_from(day) {
                observations.push(Observation::new(day, alive, dead, date));
            }
        }
        column += TRIPLE_STRIDE;
    }
    Some(observations)
}

/// Parses `doc` and applies the cleaner according to the document's
/// `clean` flag, or to `clean_override` when given.
///
/// # Errors
///
/// Propagates [`parse_document`] errors.
pub fn load_series(
    doc: &SheetDocument,
    clean_override: Option<bool>,
) -> Result<Vec<CohortSeries>, ParseError> {
    let series = parse_document(doc)?;
    if clean_override.unwrap_or(doc.params.clean) {
        Ok(series.into_iter().map(cleaner::clean).collect())
    } else {
        Ok(series)
    }
}
