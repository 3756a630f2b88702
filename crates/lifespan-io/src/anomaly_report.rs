//! Anomaly sink: detector records to estimated table coordinates.
//!
//! A visual front end wants a cell to mark, but the exact cell can only
//! be estimated: the day-to-column mapping assumes a regular triple
//! layout and unscored early days, and a date error can shift everything
//! in its row. The estimate is therefore best-effort, degrading to a
//! whole-row marker when no cell can be named.

use std::io::{self, Write};

use lifespan_core::{Anomaly, AnomalyKind};
use serde::Serialize;

/// Scoring of the first lifespan days is routinely skipped, shifting
/// the first recorded triple to roughly day five.
const ASSUMED_UNSCORED_DAYS: usize = 5;

/// Cells per scored triple in the source layout.
const TRIPLE_STRIDE: usize = 3;

/// One marker for a visual front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnomalyMarker {
    pub identifier: String,
    pub kind: AnomalyKind,
    pub day: usize,
    /// Source row of the offending series.
    pub row: usize,
    /// Estimated column of the offending triple, or `None` when only
    /// the row can be indicated (duplicate days make column estimates
    /// meaningless, and early days fall outside the assumed layout).
    pub column: Option<usize>,
}

/// Maps anomalies to estimated coordinates in the source table.
///
/// Count anomalies ([`Resurrection`](AnomalyKind::Resurrection),
/// [`SumMismatch`](AnomalyKind::SumMismatch)) point at the triple
/// estimated to hold the offending day, `day_zero_column` being the
/// layout anchor. [`DuplicateDay`](AnomalyKind::DuplicateDay) markers
/// carry no column: the dates in the row are wrong by definition, so no
/// cell estimate would hold.
#[must_use]
pub fn markers(anomalies: &[Anomaly], day_zero_column: usize) -> Vec<AnomalyMarker> {
    anomalies
        .iter()
        .map(|anomaly| {
            let column = match anomaly.kind {
                AnomalyKind::Resurrection | AnomalyKind::SumMismatch => anomaly
                    .day
                    .checked_sub(ASSUMED_UNSCORED_DAYS)
                    .map(|scored| day_zero_column + 2 + scored * TRIPLE_STRIDE),
                AnomalyKind::DuplicateDay => None,
            };
            AnomalyMarker {
                identifier: anomaly.identifier.clone(),
                kind: anomaly.kind,
                day: anomaly.day,
                row: anomaly.source_row,
                column,
            }
        })
        .collect()
}

/// Writes markers as a plain-text report, one line per marker.
///
/// # Errors
///
/// Propagates I/O errors from `writer`.
pub fn write_report<W>(writer: &mut W, markers: &[AnomalyMarker]) -> io::Result<()>
where
    W: Write,
{
    for marker in markers {
        match marker.column {
            Some(column) => writeln!(
                writer,
                "{}: {} at day {} (row {}, column ~{})",
                marker.identifier, marker.kind, marker.day, marker.row, column
            )?,
            None => writeln!(
                writer,
                "{}: {} at day {} (row {})",
                marker.identifier, marker.kind, marker.day, marker.row
            )?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anomaly(kind: AnomalyKind, day: usize) -> Anomaly {
        Anomaly {
            identifier: "g".to_owned(),
            source_row: 7,
            day,
            kind,
        }
    }

    #[test]
    fn count_anomalies_get_a_column_estimate() {
        let markers = markers(&[anomaly(AnomalyKind::Resurrection, 9)], 3);

        // Day 9, four triples past the assumed start: column 3+2+4*3.
        assert_eq!(markers[0].row, 7);
        assert_eq!(markers[0].column, Some(17));
    }

    #[test]
    fn early_days_degrade_to_row_markers() {
        let markers = markers(&[anomaly(AnomalyKind::SumMismatch, 2)], 3);
        assert_eq!(markers[0].column, None);
    }

    #[test]
    fn duplicate_days_never_get_a_column() {
        let markers = markers(&[anomaly(AnomalyKind::DuplicateDay, 9)], 3);
        assert_eq!(markers[0].column, None);
    }

    #[test]
    fn report_lines_name_kind_and_location() {
        let list = markers(&[anomaly(AnomalyKind::Resurrection, 9)], 3);
        let mut out = Vec::new();
        write_report(&mut out, &list).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("alive count increased"));
        assert!(text.contains("day 9"));
        assert!(text.contains("row 7"));
    }
}
