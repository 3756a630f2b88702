//! I/O collaborators for the lifespan analysis core.
//!
//! The core ([`lifespan_core`]) operates purely on in-memory series; this
//! crate owns the boundaries around it:
//!
//! - [`table`]: the tabular data source — a rectangular [`cell`] matrix
//!   plus column offsets, parsed leniently into cohort series
//! - [`summary`]: the summarizer sink (`name,n,cleaned,median` rows)
//! - [`export`]: the censoring-export sink (ragged day/event columns in
//!   the layout external survival tools expect)
//! - [`anomaly_report`]: the anomaly sink (detector records mapped to
//!   estimated table coordinates)
//!
//! Sources and sinks are plain values passed in and out; nothing here
//! reaches for ambient state, and the only process I/O is through the
//! `std::io::Write` handles the callers provide.
//!
//! # Examples
//!
//! ```
//! use lifespan_core::group_runs;
//! use lifespan_io::{summary, table, table::SheetDocument};
//!
//! let doc: SheetDocument = serde_json::from_str(
//!     r#"{
//!         "params": {
//!             "start_row": 0, "end_row": 0,
//!             "name_column": 0, "day_zero_column": 1,
//!             "clean": false
//!         },
//!         "rows": [["w1118", "2023-05-01", 10, "2023-05-13", 6, 4]]
//!     }"#,
//! )?;
//!
//! let series = table::load_series(&doc, None)?;
//! let cohorts = group_runs(series)?;
//! let rows = summary::summary_rows(&cohorts);
//! assert_eq!(rows[0].median, Some(12.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod anomaly_report;
pub mod cell;
pub mod export;
pub mod summary;
pub mod table;
