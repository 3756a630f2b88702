//! Data-entry anomaly detection over uncleaned series.

use serde::Serialize;

use crate::series::CohortSeries;

/// The kind of impossible transition or entry found at an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// The alive count increased; a closed cohort cannot gain members.
    #[display("alive count increased")]
    Resurrection,
    /// Alive plus dead does not sum to the series sample size.
    #[display("alive + dead does not match sample size")]
    SumMismatch,
    /// Two consecutive observations share the same day; a cohort is
    /// never scored twice on one day, so a record date is wrong.
    #[display("day repeats the previous observation")]
    DuplicateDay,
}

/// One flagged observation in one series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    /// Identifier of the offending series.
    pub identifier: String,
    /// Opaque source location of the series, carried from parsing.
    pub source_row: usize,
    /// Day of the offending observation.
    pub day: usize,
    /// What was wrong.
    pub kind: AnomalyKind,
}

/// Scans series for data-entry anomalies.
///
/// Must be run on *uncleaned* series: cleaning rewrites alive/dead counts
/// and can mask the very conditions this looks for. For each observation
/// after the first, each violated condition yields its own record, so a
/// single bad entry can be flagged twice (say, as both a resurrection and
/// a sum mismatch).
///
/// Never mutates its input and never fails; anomaly-free data yields an
/// empty vector.
#[must_use]
pub fn find_anomalies(series: &[CohortSeries]) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();
    for s in series {
        let observations = s.observations();
        for pair in observations.windows(2) {
            let [previous, current] = pair else {
                continue;
            };
            let mut flag = |kind| {
                anomalies.push(Anomaly {
                    identifier: s.identifier().to_owned(),
                    source_row: s.source_row(),
                    day: current.day,
                    kind,
                });
            };
            if current.alive > previous.alive {
                flag(AnomalyKind::Resurrection);
            }
            if current.alive + current.dead != s.sample_size() {
                flag(AnomalyKind::SumMismatch);
            }
            if current.day == previous.day {
                flag(AnomalyKind::DuplicateDay);
            }
        }
    }
    anomalies
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::observation::Observation;

    use super::*;

    fn series(identifier: &str, row: usize, points: &[(usize, u32, u32)]) -> CohortSeries {
        let date = NaiveDate::from_ymd_opt(2023, 5, 25).unwrap();
        let observations = points
            .iter()
            .map(|&(day, alive, dead)| Observation::new(day, alive, dead, date))
            .collect();
        CohortSeries::new(observations, identifier, row).unwrap()
    }

    #[test]
    fn clean_data_yields_no_anomalies() {
        let s = series("ok", 1, &[(0, 5, 0), (2, 4, 1), (5, 1, 4)]);
        assert!(find_anomalies(&[s]).is_empty());
    }

    #[test]
    fn alive_increase_flags_resurrection() {
        let s = series("g", 2, &[(0, 5, 0), (1, 6, 0)]);
        let anomalies = find_anomalies(&[s]);

        assert!(anomalies.iter().any(|a| {
            a.kind == AnomalyKind::Resurrection && a.day == 1 && a.source_row == 2
        }));
    }

    #[test]
    fn count_sum_mismatch_is_flagged() {
        let s = series("g", 0, &[(0, 5, 0), (2, 3, 1)]);
        let anomalies = find_anomalies(&[s]);

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, AnomalyKind::SumMismatch);
        assert_eq!(anomalies[0].day, 2);
    }

    #[test]
    fn repeated_day_is_flagged() {
        let s = series("g", 0, &[(0, 5, 0), (3, 4, 1), (3, 3, 2)]);
        let anomalies = find_anomalies(&[s]);

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, AnomalyKind::DuplicateDay);
        assert_eq!(anomalies[0].day, 3);
    }

    #[test]
    fn one_observation_can_violate_multiple_conditions() {
        // Alive grows and the counts no longer sum to 5.
        let s = series("g", 0, &[(0, 5, 0), (1, 6, 0)]);
        let kinds: Vec<_> = find_anomalies(&[s]).into_iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            [AnomalyKind::Resurrection, AnomalyKind::SumMismatch]
        );
    }

    #[test]
    fn day_zero_is_never_flagged() {
        // Day 0 has no predecessor; even a weird day-0 entry is not
        // reported.
        let s = series("g", 0, &[(0, 5, 2), (1, 4, 1)]);
        let anomalies = find_anomalies(&[s]);
        assert!(anomalies.iter().all(|a| a.day != 0));
    }

    #[test]
    fn anomalies_from_multiple_series_are_concatenated() {
        let a = series("a", 0, &[(0, 5, 0), (1, 6, 0)]);
        let b = series("b", 1, &[(0, 4, 0), (2, 2, 2), (2, 2, 2)]);
        let anomalies = find_anomalies(&[a, b]);

        assert!(anomalies.iter().any(|x| x.identifier == "a"));
        assert!(anomalies.iter().any(|x| x.identifier == "b"));
    }
}
