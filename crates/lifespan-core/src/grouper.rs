//! Run-based grouping of series into aggregate cohorts.

use std::mem;

use crate::{
    aggregate::{AggregateCohort, EmptyInputError},
    series::CohortSeries,
};

/// Partitions `series` into maximal runs of *adjacent* entries sharing an
/// identifier and aggregates each run into an [`AggregateCohort`].
///
/// Input order is meaningful: it reflects source row order, and two series
/// with the same identifier that are separated by a different one form two
/// separate cohorts. That is deliberate ("runs", not group-by-key), so the
/// implementation is a single linear pass over a current run key, not a
/// map keyed on identifiers.
///
/// # Errors
///
/// Returns [`EmptyInputError`] if `series` is empty.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use lifespan_core::{CohortSeries, Observation, group_runs};
///
/// let date = NaiveDate::from_ymd_opt(2023, 5, 25).unwrap();
/// let series = |id: &str| {
///     CohortSeries::new(vec![Observation::new(0, 5, 0, date)], id, 0).unwrap()
/// };
///
/// let cohorts = group_runs(vec![series("a"), series("a"), series("b"), series("a")]).unwrap();
/// let identifiers: Vec<_> = cohorts.iter().map(|c| c.identifier.as_str()).collect();
/// assert_eq!(identifiers, ["a", "b", "a"]);
/// ```
pub fn group_runs(series: Vec<CohortSeries>) -> Result<Vec<AggregateCohort>, EmptyInputError> {
    let mut series = series.into_iter();
    let first = series.next().ok_or(EmptyInputError)?;

    let mut cohorts = Vec::new();
    let mut run_key = first.identifier().to_owned();
    let mut run = vec![first];
    for entry in series {
        if entry.identifier() == run_key {
            run.push(entry);
        } else {
            run_key = entry.identifier().to_owned();
            let finished = mem::replace(&mut run, vec![entry]);
            cohorts.push(AggregateCohort::from_members(finished)?);
        }
    }
    cohorts.push(AggregateCohort::from_members(run)?);
    Ok(cohorts)
}
