//! Core data model and algorithms for longitudinal survival (lifespan)
//! experiments: cohorts of individuals scored periodically for alive/dead
//! counts.
//!
//! Everything in this crate is a synchronous, deterministic transformation
//! over in-memory series; collaborators own all I/O. The pipeline runs:
//!
//! 1. Parsed rows become [`Observation`]s and per-cohort [`CohortSeries`]
//!    ("technical replicates") with carry-forward day lookup.
//! 2. [`cleaner`] optionally removes a counting artifact in which a fixed
//!    number of individuals are recorded as permanently alive.
//! 3. [`group_runs`] pools adjacent series sharing an identifier into
//!    [`AggregateCohort`]s ("biological replicates") with pooled death
//!    events and an interpolated median survival.
//! 4. [`censoring_events`] flattens a cohort into the per-individual
//!    (day, event) list that survival-curve tools (Kaplan-Meier fitters)
//!    consume.
//!
//! Independently of cleaning, [`find_anomalies`] scans raw series for
//! impossible transitions and duplicated scoring days.
//!
//! # Modules
//!
//! - [`observation`]: a single scored time point
//! - [`series`]: per-cohort time series and day lookup
//! - [`cleaner`]: the artifact fixpoint algorithm
//! - [`grouper`]: adjacency-based run grouping
//! - [`aggregate`]: death aggregation and median estimation
//! - [`anomaly`]: data-entry anomaly detection
//! - [`censoring`]: censoring-style event export
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use lifespan_core::{CohortSeries, Observation, censoring_events, group_runs};
//!
//! let date = NaiveDate::from_ymd_opt(2023, 5, 25).unwrap();
//! let series = CohortSeries::new(
//!     vec![
//!         Observation::new(0, 10, 0, date),
//!         Observation::new(12, 4, 6, date),
//!         Observation::new(20, 0, 10, date),
//!     ],
//!     "w1118",
//!     0,
//! )?;
//!
//! let cohorts = group_runs(vec![series])?;
//! assert_eq!(cohorts[0].median, Some(12.0));
//!
//! let export = censoring_events(&cohorts[0]);
//! assert_eq!(export.events.len(), 10);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    aggregate::{AggregateCohort, EmptyInputError},
    anomaly::{Anomaly, AnomalyKind, find_anomalies},
    censoring::{CensoringEvent, CensoringExport, EventStatus, SampleSizeMismatch, censoring_events},
    cleaner::{clean, cleanable},
    grouper::group_runs,
    observation::Observation,
    series::{CohortSeries, NoDataError},
};

pub mod aggregate;
pub mod anomaly;
pub mod censoring;
pub mod cleaner;
pub mod grouper;
pub mod observation;
pub mod series;
