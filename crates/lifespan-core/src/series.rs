//! Per-cohort time series with carry-forward day lookup.

use crate::observation::Observation;

/// A series of observations has no day-0 entry to anchor lookups on.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("cohort series has no day-0 observation")]
pub struct NoDataError;

/// Ordered observation series for one physically scored cohort
/// (a "technical replicate": one vial or dish).
///
/// Invariants established at construction and preserved afterwards:
///
/// - the first observation is at day 0
/// - `sample_size` is the day-0 alive count
/// - `last_day` is the day of the final observation
/// - `cleaned_count` starts at 0 and only grows (see [`cleaner`](crate::cleaner))
///
/// Days are expected to increase strictly in a well-formed series, with
/// gaps allowed for unscored days. Ill-formed series (duplicated or
/// out-of-order days) are still representable so that
/// [`find_anomalies`](crate::anomaly::find_anomalies) can report them.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use lifespan_core::{CohortSeries, Observation};
///
/// let date = NaiveDate::from_ymd_opt(2023, 5, 25).unwrap();
/// let series = CohortSeries::new(
///     vec![
///         Observation::new(0, 10, 0, date),
///         Observation::new(5, 8, 2, date),
///         Observation::new(10, 6, 4, date),
///     ],
///     "w1118",
///     3,
/// )
/// .unwrap();
///
/// // Day 7 was never scored; the day-5 state carries forward.
/// assert_eq!(series.observation_at(7).alive, 8);
/// ```
#[derive(Debug, Clone)]
pub struct CohortSeries {
    pub(crate) observations: Vec<Observation>,
    identifier: String,
    source_row: usize,
    sample_size: u32,
    last_day: usize,
    pub(crate) cleaned_count: u32,
    /// `day_index[d]` is the index of the observation that answers a
    /// lookup for day `d`: the first observation at day `d` if one
    /// exists, otherwise the observation at the latest day below `d`.
    day_index: Vec<usize>,
}

impl CohortSeries {
    /// Builds a series from parsed observations.
    ///
    /// `identifier` is the condition label (ordinarily a genotype) and
    /// `source_row` an opaque token locating the series in its source
    /// table, carried through for anomaly reporting.
    ///
    /// # Errors
    ///
    /// Returns [`NoDataError`] if `observations` is empty or does not
    /// start at day 0.
    pub fn new(
        observations: Vec<Observation>,
        identifier: impl Into<String>,
        source_row: usize,
    ) -> Result<Self, NoDataError> {
        let (first, last) = match (observations.first(), observations.last()) {
            (Some(first), Some(last)) if first.day == 0 => (first, last),
            _ => return Err(NoDataError),
        };
        let sample_size = first.alive;
        let last_day = last.day;
        let day_index = build_day_index(&observations, last_day);
        Ok(Self {
            observations,
            identifier: identifier.into(),
            source_row,
            sample_size,
            last_day,
            cleaned_count: 0,
            day_index,
        })
    }

    /// Condition label shared by replicates of the same cohort.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Opaque location of this series in its source table.
    #[must_use]
    pub const fn source_row(&self) -> usize {
        self.source_row
    }

    /// Number of individuals at day 0, fixed at construction.
    ///
    /// Unlike the observation counts this is *not* adjusted by cleaning;
    /// the effective size of a cleaned series is
    /// `sample_size() - cleaned_count()`.
    #[must_use]
    pub const fn sample_size(&self) -> u32 {
        self.sample_size
    }

    /// Last day the series was scored.
    #[must_use]
    pub const fn last_day(&self) -> usize {
        self.last_day
    }

    /// Number of artifact individuals removed by cleaning so far.
    #[must_use]
    pub const fn cleaned_count(&self) -> u32 {
        self.cleaned_count
    }

    /// All observations in input order.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// The final observation of the series.
    #[must_use]
    pub fn last_observation(&self) -> &Observation {
        // Non-empty by construction.
        &self.observations[self.observations.len() - 1]
    }

    /// Returns the observation for `day`, carrying the last scored state
    /// forward over unscored days.
    ///
    /// If `day` itself was scored, that observation is returned;
    /// otherwise the observation at the latest scored day below `day`.
    /// Days past [`last_day`](Self::last_day) resolve to the final
    /// observation. Backed by an index precomputed at construction, so
    /// each lookup is O(1).
    #[must_use]
    pub fn observation_at(&self, day: usize) -> &Observation {
        &self.observations[self.day_index[day.min(self.last_day)]]
    }
}

/// Forward-fills a day -> observation-index table in a single pass,
/// replacing repeated backward searches over the observation list.
/// Duplicate days resolve to the first observation recorded for that day.
fn build_day_index(observations: &[Observation], last_day: usize) -> Vec<usize> {
    let mut first_at_day = vec![None; last_day + 1];
    for (index, obs) in observations.iter().enumerate() {
        if obs.day <= last_day && first_at_day[obs.day].is_none() {
            first_at_day[obs.day] = Some(index);
        }
    }

    let mut day_index = Vec::with_capacity(last_day + 1);
    let mut current = 0;
    for slot in first_at_day {
        if let Some(index) = slot {
            current = index;
        }
        day_index.push(current);
    }
    day_index
}
