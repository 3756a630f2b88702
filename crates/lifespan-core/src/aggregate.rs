//! Pooling of technical replicates into a biological replicate.

use crate::series::CohortSeries;

/// Aggregation was asked to pool zero series.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("no cohort series to aggregate")]
pub struct EmptyInputError;

/// Pooled death-event counts and median survival for a run of
/// [`CohortSeries`] sharing one identifier (a "biological replicate").
///
/// Everything here is derived from `members` at construction and
/// immutable afterwards. Per-day vectors are indexed by day from 0 to
/// `max_day` inclusive.
///
/// `death_events` and `cumulative_deaths` are signed: on well-formed
/// input they are non-negative, but a data-entry error that raises an
/// alive count can produce a negative per-day delta, and that signal is
/// preserved for the anomaly tooling rather than clamped away.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use lifespan_core::{AggregateCohort, CohortSeries, Observation};
///
/// let date = NaiveDate::from_ymd_opt(2023, 5, 25).unwrap();
/// let series = CohortSeries::new(
///     vec![
///         Observation::new(0, 4, 0, date),
///         Observation::new(2, 1, 3, date),
///     ],
///     "w1118",
///     0,
/// )
/// .unwrap();
///
/// let cohort = AggregateCohort::from_members(vec![series]).unwrap();
/// assert_eq!(cohort.sample_size, 4);
/// assert_eq!(cohort.death_events, [0, 0, 3]);
/// assert_eq!(cohort.median, Some(2.0));
/// ```
#[derive(Debug, Clone)]
pub struct AggregateCohort {
    /// The pooled technical replicates, in input order.
    pub members: Vec<CohortSeries>,
    /// Identifier shared by every member.
    pub identifier: String,
    /// Pooled effective sample size: sum of member sample sizes minus
    /// their cleaned counts.
    pub sample_size: u32,
    /// Total artifact individuals removed across all members.
    pub cleaned_total: u32,
    /// Largest `last_day` among the members.
    pub max_day: usize,
    /// New deaths on each day, pooled across members.
    pub death_events: Vec<i64>,
    /// Running total of `death_events`.
    pub cumulative_deaths: Vec<i64>,
    /// Interpolated day on which cumulative deaths cross half the sample
    /// size, or `None` if more than half the cohort outlives the record.
    pub median: Option<f64>,
}

impl AggregateCohort {
    /// Pools `members` into one aggregate cohort.
    ///
    /// The identifier is taken from the first member; callers are
    /// expected to pass a run of series sharing it (see
    /// [`group_runs`](crate::grouper::group_runs)).
    ///
    /// # Errors
    ///
    /// Returns [`EmptyInputError`] if `members` is empty.
    pub fn from_members(members: Vec<CohortSeries>) -> Result<Self, EmptyInputError> {
        let first = members.first().ok_or(EmptyInputError)?;
        let identifier = first.identifier().to_owned();

        // Cleaning cannot remove more individuals than a well-formed
        // series started with; saturate anyway for malformed ones.
        let sample_size = members
            .iter()
            .map(|m| m.sample_size().saturating_sub(m.cleaned_count()))
            .sum();
        let cleaned_total = members.iter().map(CohortSeries::cleaned_count).sum();
        // members is non-empty, so the max exists.
        let max_day = members
            .iter()
            .map(CohortSeries::last_day)
            .max()
            .unwrap_or(0);

        let death_events = pooled_death_events(&members, max_day);
        let cumulative_deaths = death_events
            .iter()
            .scan(0_i64, |total, &events| {
                *total += events;
                Some(*total)
            })
            .collect::<Vec<_>>();
        let median = median_survival(&cumulative_deaths, sample_size);

        Ok(Self {
            members,
            identifier,
            sample_size,
            cleaned_total,
            max_day,
            death_events,
            cumulative_deaths,
            median,
        })
    }
}

/// New deaths per day, summed over every member still on record that day
/// (`last_day >= t`), with carry-forward lookup filling scoring gaps.
fn pooled_death_events(members: &[CohortSeries], max_day: usize) -> Vec<i64> {
    let mut death_events = Vec::with_capacity(max_day + 1);
    for t in 0..=max_day {
        let mut deaths = 0_i64;
        for member in members {
            if member.last_day() < t {
                continue;
            }
            if t == 0 {
                deaths += i64::from(member.observation_at(0).dead);
            } else {
                deaths += i64::from(member.observation_at(t).dead)
                    - i64::from(member.observation_at(t - 1).dead);
            }
        }
        death_events.push(deaths);
    }
    death_events
}

/// Interpolates the day on which cumulative deaths cross 50% of the
/// sample size.
///
/// With `half = sample_size / 2` (real division), the crossing is placed
/// midway between the first day strictly above `half` and the day after
/// the last day strictly below it. If no day exceeds `half`, the median
/// is undefined and `None` is returned; `None` is never conflated with a
/// crossing at day 0.
#[expect(clippy::cast_precision_loss)]
fn median_survival(cumulative_deaths: &[i64], sample_size: u32) -> Option<f64> {
    let half = f64::from(sample_size) / 2.0;
    let above = cumulative_deaths
        .iter()
        .position(|&total| total as f64 > half)?;
    // Deaths at or above half from day 0 leave no sub-threshold day; the
    // crossing is then attributed to the start of the record.
    let below_next = (0..above)
        .rev()
        .find(|&i| (cumulative_deaths[i] as f64) < half)
        .map_or(0, |i| i + 1);
    Some((above + below_next) as f64 / 2.0)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::{cleaner, observation::Observation};

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 5, 25).unwrap()
    }

    fn series(identifier: &str, points: &[(usize, u32, u32)]) -> CohortSeries {
        let observations = points
            .iter()
            .map(|&(day, alive, dead)| Observation::new(day, alive, dead, date()))
            .collect();
        CohortSeries::new(observations, identifier, 0).unwrap()
    }

    #[test]
    fn empty_member_list_is_rejected() {
        assert!(AggregateCohort::from_members(vec![]).is_err());
    }

    #[test]
    fn death_events_pool_across_members_with_carry_forward() {
        let a = series("g", &[(0, 5, 0), (2, 3, 2), (4, 2, 3)]);
        let b = series("g", &[(0, 5, 0), (3, 4, 1)]);
        let cohort = AggregateCohort::from_members(vec![a, b]).unwrap();

        assert_eq!(cohort.max_day, 4);
        // Day 2: a records 2 deaths, b carries day 0 forward.
        // Day 3: only b, 1 death. Day 4: b is off record, a adds 1.
        assert_eq!(cohort.death_events, [0, 0, 2, 1, 1]);
        assert_eq!(cohort.cumulative_deaths, [0, 0, 2, 3, 4]);
    }

    #[test]
    fn day_zero_deaths_are_counted() {
        let a = series("g", &[(0, 4, 1), (2, 2, 3)]);
        let cohort = AggregateCohort::from_members(vec![a]).unwrap();
        assert_eq!(cohort.death_events[0], 1);
    }

    #[test]
    fn sample_size_subtracts_cleaned_individuals() {
        let points: Vec<(usize, u32, u32)> = (0..=20)
            .map(|day| {
                let alive = 6u32.saturating_sub(u32::try_from(day).unwrap()).max(1);
                (day, alive, 6 - alive)
            })
            .collect();
        let cleaned = cleaner::clean(series("g", &points));
        assert_eq!(cleaned.cleaned_count(), 1);

        let cohort = AggregateCohort::from_members(vec![cleaned]).unwrap();
        assert_eq!(cohort.sample_size, 5);
        assert_eq!(cohort.cleaned_total, 1);
    }

    #[test]
    fn median_interpolates_the_crossing() {
        // cumulative deaths over days 0..=9: [0,0,0,1,3,5,6,8,9,10]
        let deaths = [0, 0, 0, 1, 2, 2, 1, 2, 1, 1];
        let points: Vec<(usize, u32, u32)> = std::iter::once((0, 10, 0))
            .chain((1..=9).map(|day| {
                let dead: u32 = deaths[..=day].iter().sum();
                (day, 10 - dead, dead)
            }))
            .collect();
        let cohort = AggregateCohort::from_members(vec![series("g", &points)]).unwrap();

        assert_eq!(
            cohort.cumulative_deaths,
            [0, 0, 0, 1, 3, 5, 6, 8, 9, 10]
        );
        assert_eq!(cohort.median, Some(5.5));
    }

    #[test]
    fn median_is_undefined_when_half_survive() {
        let cohort =
            AggregateCohort::from_members(vec![series("g", &[(0, 10, 0), (20, 6, 4)])]).unwrap();
        assert_eq!(cohort.median, None);
    }

    #[test]
    fn median_with_deaths_at_half_from_day_zero() {
        // Cumulative deaths sit exactly at half on day 0 and cross on
        // day 1; no strictly-sub-threshold day exists.
        let cohort =
            AggregateCohort::from_members(vec![series("g", &[(0, 4, 2), (1, 1, 3)])]).unwrap();
        assert_eq!(cohort.median, Some(0.5));
    }

    #[test]
    fn exact_half_does_not_count_as_crossing() {
        // Deaths reach exactly half and never exceed it.
        let cohort =
            AggregateCohort::from_members(vec![series("g", &[(0, 10, 0), (5, 5, 5)])]).unwrap();
        assert_eq!(cohort.median, None);
    }
}
