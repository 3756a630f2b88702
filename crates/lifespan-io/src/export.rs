//! Censoring-export sink: ragged day/event columns for survival tools.
//!
//! External curve-fitting tools (Prism and friends) take one shared day
//! column and one event column per cohort, where each cohort's events
//! start below the previous cohort's and every other cell in its column
//! stays blank. This module lays the flattened event lists of several
//! cohorts out in exactly that shape.

use std::io::{self, Write};

use lifespan_core::{AggregateCohort, SampleSizeMismatch, censoring_events};
use serde::Serialize;

/// One cohort's event column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventColumn {
    pub identifier: String,
    /// Index into the shared day column where this cohort's events
    /// begin.
    pub offset: usize,
    /// Event codes, 1 for a death and 0 for a censoring, in day order.
    pub events: Vec<u8>,
}

/// Day column plus per-cohort event columns, with any sample-size
/// warnings the exporters raised.
#[derive(Debug, Clone, Serialize)]
pub struct ExportLayout {
    /// Event days of every cohort, concatenated in cohort order.
    pub days: Vec<usize>,
    pub columns: Vec<EventColumn>,
    /// Postcondition failures, one per affected cohort. The affected
    /// cohort's events are still present above; the warning is carried
    /// alongside instead of a sentinel row in the stream.
    pub warnings: Vec<SampleSizeMismatch>,
}

impl ExportLayout {
    /// Lays out the censoring exports of `cohorts`, in order.
    #[must_use]
    pub fn from_cohorts(cohorts: &[AggregateCohort]) -> Self {
        let mut days = Vec::new();
        let mut columns = Vec::new();
        let mut warnings = Vec::new();

        for cohort in cohorts {
            let export = censoring_events(cohort);
            let offset = days.len();
            days.extend(export.events.iter().map(|event| event.day));
            columns.push(EventColumn {
                identifier: cohort.identifier.clone(),
                offset,
                events: export
                    .events
                    .iter()
                    .map(|event| event.status.code())
                    .collect(),
            });
            warnings.extend(export.mismatch);
        }

        Self {
            days,
            columns,
            warnings,
        }
    }

    /// Writes the layout as a comma-separated table: a `Days` column and
    /// one header-labeled column per cohort, blank outside the cohort's
    /// own rows.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `writer`.
    pub fn write_table<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        write!(writer, "Days")?;
        for column in &self.columns {
            write!(writer, ",{}", column.identifier)?;
        }
        writeln!(writer)?;

        for (row, day) in self.days.iter().enumerate() {
            write!(writer, "{day}")?;
            for column in &self.columns {
                let cell = row
                    .checked_sub(column.offset)
                    .and_then(|index| column.events.get(index));
                match cell {
                    Some(code) => write!(writer, ",{code}")?,
                    None => write!(writer, ",")?,
                }
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use lifespan_core::{CohortSeries, Observation, group_runs};

    use super::*;

    fn series(identifier: &str, row: usize, points: &[(usize, u32, u32)]) -> CohortSeries {
        let date = NaiveDate::from_ymd_opt(2023, 5, 25).unwrap();
        let observations = points
            .iter()
            .map(|&(day, alive, dead)| Observation::new(day, alive, dead, date))
            .collect();
        CohortSeries::new(observations, identifier, row).unwrap()
    }

    fn two_cohorts() -> Vec<AggregateCohort> {
        group_runs(vec![
            series("a", 0, &[(0, 2, 0), (3, 0, 2)]),
            series("b", 1, &[(0, 2, 0), (4, 1, 1)]),
        ])
        .unwrap()
    }

    #[test]
    fn columns_are_offset_consecutively() {
        let layout = ExportLayout::from_cohorts(&two_cohorts());

        assert_eq!(layout.days, [3, 3, 4, 4]);
        assert_eq!(layout.columns[0].offset, 0);
        assert_eq!(layout.columns[0].events, [1, 1]);
        assert_eq!(layout.columns[1].offset, 2);
        // One death, one individual censored on the final day.
        assert_eq!(layout.columns[1].events, [1, 0]);
        assert!(layout.warnings.is_empty());
    }

    #[test]
    fn table_blanks_cells_outside_each_cohort() {
        let layout = ExportLayout::from_cohorts(&two_cohorts());

        let mut out = Vec::new();
        layout.write_table(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text, "Days,a,b\n3,1,\n3,1,\n4,,1\n4,,0\n");
    }

    #[test]
    fn mismatched_cohorts_warn_but_stay_in_the_stream() {
        let cohorts =
            group_runs(vec![series("bad", 0, &[(0, 5, 0), (3, 2, 2)])]).unwrap();
        let layout = ExportLayout::from_cohorts(&cohorts);

        assert_eq!(layout.warnings.len(), 1);
        assert_eq!(layout.warnings[0].expected, 5);
        assert_eq!(layout.warnings[0].emitted, 4);
        assert_eq!(layout.columns[0].events.len(), 4);
    }

    #[test]
    fn empty_cohort_list_yields_an_empty_layout() {
        let layout = ExportLayout::from_cohorts(&[]);
        assert!(layout.days.is_empty());
        assert!(layout.columns.is_empty());
    }
}
