//! Cell value model for rectangular table input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One cell of a rectangular input table.
///
/// Deserializes untagged from JSON: a number, an ISO-8601 date string, any
/// other string, or `null` for an empty cell. Variant order matters for
/// untagged deserialization: date strings must be tried before plain text.
///
/// # Examples
///
/// ```
/// use lifespan_io::cell::Cell;
///
/// let row: Vec<Cell> = serde_json::from_str(r#"["w1118", "2023-05-25", 20, null]"#).unwrap();
/// assert_eq!(row[0].display_name().as_deref(), Some("w1118"));
/// assert!(row[1].as_date().is_some());
/// assert_eq!(row[2].as_count(), Some(20));
/// assert!(row[3].display_name().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// A numeric cell.
    Number(f64),
    /// A date cell.
    Date(NaiveDate),
    /// Free text.
    Text(String),
    /// An empty cell.
    Empty,
}

impl Cell {
    /// Interprets the cell as a non-negative count, truncating any
    /// fractional part the way sheet formulas do.
    ///
    /// Returns `None` for non-numeric cells and for negative or
    /// non-finite numbers.
    #[must_use]
    pub fn as_count(&self) -> Option<u32> {
        match self {
            #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Self::Number(value) if value.is_finite() && *value >= 0.0 => {
                Some(value.min(f64::from(u32::MAX)) as u32)
            }
            _ => None,
        }
    }

    /// Interprets the cell as a calendar date.
    #[must_use]
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// Renders the cell as a cohort identifier, if it holds one.
    ///
    /// Blank cells (empty or whitespace-only text) yield `None`; any
    /// other value is rendered to a string, since identifiers in real
    /// sheets are occasionally numeric labels.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        match self {
            Self::Number(value) => Some(value.to_string()),
            Self::Date(date) => Some(date.to_string()),
            Self::Text(text) if !text.trim().is_empty() => Some(text.clone()),
            Self::Text(_) | Self::Empty => None,
        }
    }
}
