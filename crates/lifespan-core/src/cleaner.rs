//! Detection and removal of the permanently-alive counting artifact.
//!
//! Some entry workflows default every new time point to "no deaths", so a
//! mis-entered individual can ride along as permanently alive and inflate
//! the cohort size. The signature of the artifact is an alive count that
//! sits on a positive plateau over six consecutive days late in the
//! experiment, when a real cohort should be attriting.

use crate::series::CohortSeries;

/// Earliest day a plateau is trusted as an artifact rather than a lull.
const MIN_DETECTION_DAY: usize = 15;

/// Length in days of the flat window that triggers detection.
const PLATEAU_WINDOW: usize = 6;

/// Returns true if `series` shows the artifact plateau: some day `d` with
/// `15 <= d <= last_day` where the alive counts over the inclusive window
/// `[d - 5, d]` are all identical and strictly positive.
#[must_use]
pub fn cleanable(series: &CohortSeries) -> bool {
    (MIN_DETECTION_DAY..=series.last_day()).any(|d| {
        let start = d + 1 - PLATEAU_WINDOW;
        let level = series.observation_at(start).alive;
        level > 0 && (start + 1..=d).all(|day| series.observation_at(day).alive == level)
    })
}

/// Removes artifact individuals from `series` until it is no longer
/// [`cleanable`], and returns the cleaned series.
///
/// Each pass retroactively deletes one individual from the entire recorded
/// history: every observation's alive count is decremented if positive,
/// otherwise its dead count is, and `cleaned_count` grows by one. Day
/// values and `last_day` are never touched. Each pass lowers the plateau
/// that triggered it by one, and counts are bounded below by zero, so the
/// loop ends after at most `sample_size` passes. A non-cleanable series is
/// returned unchanged.
///
/// The decrement rule reproduces the observed spreadsheet artifact
/// mechanically. It has no biological justification and should be treated
/// as a fragile heuristic tied to that entry workflow, not as a general
/// correction for miscounted cohorts.
///
/// Taking the series by value keeps partially-cleaned state unobservable:
/// the caller hands ownership in and gets the fixpoint back.
#[must_use]
pub fn clean(mut series: CohortSeries) -> CohortSeries {
    while cleanable(&series) {
        for obs in &mut series.observations {
            if obs.alive > 0 {
                obs.alive -= 1;
            } else {
                // Zero dead alongside zero alive only happens on malformed
                // rows; clamp instead of underflowing.
                obs.dead = obs.dead.saturating_sub(1);
            }
        }
        series.cleaned_count += 1;
    }
    series
}
