//! Report time window.
//!
//! A single inclusive-start, open-ended boundary applied to every
//! time-filtered source in a run, so one checkpoint reflects one
//! coherent time slice. Team/task state is deliberately exempt: it
//! describes current coordination state, not historical activity.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// Error parsing a window start date.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid --since date '{input}': expected YYYY-MM-DD")]
pub struct WindowParseError {
    /// The rejected input.
    pub input: String,
}

/// The time range a checkpoint covers.
///
/// The start is inclusive; the end is always "now". No start means all
/// available history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    since: Option<NaiveDate>,
}

impl TimeWindow {
    /// A window covering all available history.
    pub fn all() -> Self {
        Self { since: None }
    }

    /// Parse an optional `YYYY-MM-DD` start date.
    pub fn parse(since: Option<&str>) -> Result<Self, WindowParseError> {
        match since {
            None => Ok(Self::all()),
            Some(raw) => {
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                    WindowParseError {
                        input: raw.to_string(),
                    }
                })?;
                Ok(Self { since: Some(date) })
            }
        }
    }

    /// The start date in `YYYY-MM-DD` form, for display and for git's
    /// `--since` argument.
    pub fn since_arg(&self) -> Option<String> {
        self.since.map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Whether a timestamped record falls inside the window.
    ///
    /// The start date is interpreted as midnight UTC; records at or
    /// after it are included. An unbounded window includes everything.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        match self.since {
            None => true,
            Some(date) => {
                let start = date
                    .and_hms_opt(0, 0, 0)
                    .expect("midnight is always valid")
                    .and_utc();
                ts >= start
            }
        }
    }
}
