//! Flat (day, event) export for survival-curve tools.

use serde::Serialize;

use crate::aggregate::AggregateCohort;

/// What happened to one individual on its event day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// The individual died on this day.
    Death,
    /// Observation ended with the individual still alive
    /// (administrative censoring at the member's final scoring day).
    Censored,
}

impl EventStatus {
    /// Numeric code used by external survival tools: 1 for a death,
    /// 0 for a censoring.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Death => 1,
            Self::Censored => 0,
        }
    }
}

/// One individual's row in the export: the day its record ended and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CensoringEvent {
    pub day: usize,
    pub status: EventStatus,
}

/// The export postcondition failed: the cohort's events do not account
/// for every individual, indicating a data-integrity defect upstream.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, Serialize)]
#[display("cohort '{identifier}': {emitted} events emitted for sample size {expected}")]
pub struct SampleSizeMismatch {
    pub identifier: String,
    pub expected: u32,
    pub emitted: usize,
}

/// Per-individual event list for one cohort, plus the postcondition
/// check.
///
/// When `mismatch` is `Some`, the events are still the faithful
/// rendering of the cohort's counts; the warning marks the cohort as
/// suspect instead of injecting a sentinel row into the stream.
#[derive(Debug, Clone, Serialize)]
pub struct CensoringExport {
    pub events: Vec<CensoringEvent>,
    pub mismatch: Option<SampleSizeMismatch>,
}

/// Flattens an [`AggregateCohort`] into one event per individual.
///
/// For each day up to `max_day`, one [`EventStatus::Death`] event is
/// emitted per pooled death that day, followed by one
/// [`EventStatus::Censored`] event per individual still alive in the
/// final observation of each member whose record ends that day. On
/// well-formed input the emitted events cover the cohort's sample size
/// exactly; any shortfall or excess is reported in
/// [`CensoringExport::mismatch`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use lifespan_core::{AggregateCohort, CohortSeries, Observation, censoring_events};
///
/// let date = NaiveDate::from_ymd_opt(2023, 5, 25).unwrap();
/// let member = |row| {
///     CohortSeries::new(
///         vec![Observation::new(0, 3, 0, date), Observation::new(10, 3, 0, date)],
///         "long-lived",
///         row,
///     )
///     .unwrap()
/// };
/// let cohort = AggregateCohort::from_members(vec![member(0), member(1)]).unwrap();
///
/// let export = censoring_events(&cohort);
/// assert!(export.mismatch.is_none());
/// // Nobody died: six individuals censored on day 10.
/// assert_eq!(export.events.len(), 6);
/// assert!(export.events.iter().all(|e| e.day == 10 && e.status.code() == 0));
/// ```
#[must_use]
pub fn censoring_events(cohort: &AggregateCohort) -> CensoringExport {
    let mut events = Vec::with_capacity(cohort.sample_size as usize);
    for day in 0..=cohort.max_day {
        // Negative pooled counts only occur on malformed data; they
        // contribute no events and surface through the mismatch check.
        for _ in 0..cohort.death_events[day].max(0) {
            events.push(CensoringEvent {
                day,
                status: EventStatus::Death,
            });
        }
        for member in &cohort.members {
            if member.last_day() == day {
                for _ in 0..member.last_observation().alive {
                    events.push(CensoringEvent {
                        day,
                        status: EventStatus::Censored,
                    });
                }
            }
        }
    }

    let mismatch = (events.len() != cohort.sample_size as usize).then(|| SampleSizeMismatch {
        identifier: cohort.identifier.clone(),
        expected: cohort.sample_size,
        emitted: events.len(),
    });
    CensoringExport { events, mismatch }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::{observation::Observation, series::CohortSeries};

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 5, 25).unwrap()
    }

    fn series(identifier: &str, row: usize, points: &[(usize, u32, u32)]) -> CohortSeries {
        let observations = points
            .iter()
            .map(|&(day, alive, dead)| Observation::new(day, alive, dead, date()))
            .collect();
        CohortSeries::new(observations, identifier, row).unwrap()
    }

    fn cohort(members: Vec<CohortSeries>) -> AggregateCohort {
        AggregateCohort::from_members(members).unwrap()
    }

    #[test]
    fn fully_surviving_cohort_is_censored_on_its_last_day() {
        let members = vec![
            series("g", 0, &[(0, 3, 0), (10, 3, 0)]),
            series("g", 1, &[(0, 3, 0), (10, 3, 0)]),
        ];
        let export = censoring_events(&cohort(members));

        assert!(export.mismatch.is_none());
        assert_eq!(export.events.len(), 6);
        assert!(
            export
                .events
                .iter()
                .all(|e| e.day == 10 && e.status == EventStatus::Censored)
        );
    }

    #[test]
    fn every_individual_is_accounted_for() {
        let members = vec![
            series("g", 0, &[(0, 5, 0), (3, 2, 3), (9, 1, 4)]),
            series("g", 1, &[(0, 4, 0), (6, 2, 2)]),
        ];
        let export = censoring_events(&cohort(members));

        assert!(export.mismatch.is_none());
        assert_eq!(export.events.len(), 9);

        let deaths = export
            .events
            .iter()
            .filter(|e| e.status == EventStatus::Death)
            .count();
        assert_eq!(deaths, 6);
    }

    #[test]
    fn deaths_precede_same_day_censorings() {
        let members = vec![
            series("g", 0, &[(0, 2, 0), (5, 1, 1)]),
            series("g", 1, &[(0, 1, 0), (5, 1, 0)]),
        ];
        let export = censoring_events(&cohort(members));

        let day5: Vec<_> = export
            .events
            .iter()
            .filter(|e| e.day == 5)
            .map(|e| e.status)
            .collect();
        assert_eq!(
            day5,
            [
                EventStatus::Death,
                EventStatus::Censored,
                EventStatus::Censored
            ]
        );
    }

    #[test]
    fn short_member_is_censored_before_max_day() {
        let members = vec![
            series("g", 0, &[(0, 2, 0), (4, 2, 0)]),
            series("g", 1, &[(0, 2, 0), (10, 0, 2)]),
        ];
        let export = censoring_events(&cohort(members));

        let censored_days: Vec<_> = export
            .events
            .iter()
            .filter(|e| e.status == EventStatus::Censored)
            .map(|e| e.day)
            .collect();
        assert_eq!(censored_days, [4, 4]);
    }

    #[test]
    fn mismatch_is_reported_not_silently_padded() {
        // Sum mismatch upstream: day-3 counts drop an individual.
        let members = vec![series("g", 0, &[(0, 5, 0), (3, 2, 2)])];
        let export = censoring_events(&cohort(members));

        let mismatch = export.mismatch.expect("expected a sample size mismatch");
        assert_eq!(mismatch.expected, 5);
        assert_eq!(mismatch.emitted, 4);
        assert_eq!(export.events.len(), 4);
    }
}
