use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One scored time point for a cohort.
///
/// An observation is a snapshot: on `day` of the experiment (`date` on the
/// calendar), `alive` individuals were still alive and `dead` had died.
/// Counts are non-negative by construction; an observation whose counts do
/// not sum to the cohort's sample size is an *anomaly* to be detected (see
/// [`anomaly`](crate::anomaly)), not a value that is rejected here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Observation {
    /// Day index within the experiment, starting at 0.
    pub day: usize,
    /// Number of individuals alive on this day.
    pub alive: u32,
    /// Number of individuals dead on this day.
    pub dead: u32,
    /// Calendar date the counts were recorded.
    pub date: NaiveDate,
}

impl Observation {
    /// Creates a new observation snapshot.
    #[must_use]
    pub const fn new(day: usize, alive: u32, dead: u32, date: NaiveDate) -> Self {
        Self {
            day,
            alive,
            dead,
            date,
        }
    }
}
