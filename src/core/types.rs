//! core::types
//!
//! Core domain types shared across the pipeline.
//!
//! # Types
//!
//! - [`ReleaseTimestamp`] - Second-precision UTC instant rendered as `YYYY-MM-DDTHH:MM:SSZ`
//! - [`ReleaseRef`] - A release tag resolved to its creation time
//! - [`TimeWindow`] - The `start..end` merge window between two releases
//! - [`Issue`] - A search hit: title, link and labels
//!
//! # Examples
//!
//! ```
//! use chrono::{DateTime, Utc};
//! use gh_changelog::core::types::ReleaseTimestamp;
//!
//! let dt: DateTime<Utc> = "2023-05-01T10:03:07.450+02:00".parse().unwrap();
//! let ts = ReleaseTimestamp::from_datetime(dt);
//! assert_eq!(ts.to_string(), "2023-05-01T08:03:07Z");
//! ```

use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;

/// Format used for timestamps inside search qualifiers.
const QUERY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid time window: start {start} is after end {end}")]
    InvalidWindow { start: String, end: String },
}

/// A UTC instant truncated to whole seconds.
///
/// `Display` renders the fixed, zero-padded `YYYY-MM-DDTHH:MM:SSZ` form that
/// GitHub's search qualifiers accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseTimestamp(DateTime<Utc>);

impl ReleaseTimestamp {
    /// Create a timestamp from any chrono datetime, converting to UTC and
    /// dropping sub-second precision.
    pub fn from_datetime<Tz: chrono::TimeZone>(dt: DateTime<Tz>) -> Self {
        Self(dt.with_timezone(&Utc).trunc_subsecs(0))
    }

    /// Get the underlying datetime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl std::fmt::Display for ReleaseTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(QUERY_TIME_FORMAT))
    }
}

/// A release tag resolved against the forge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRef {
    /// Tag name as given by the caller (or as reported for the latest release)
    pub tag: String,
    /// Creation time of the release
    pub created_at: ReleaseTimestamp,
}

/// A merged pull request as returned by an issue search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Issue/PR number
    pub number: u64,
    /// Title
    pub title: String,
    /// Canonical web URL
    pub url: String,
    /// Label names in the order the forge lists them
    pub labels: Vec<String>,
}

/// Merge window between the previous and the current release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: ReleaseTimestamp,
    end: ReleaseTimestamp,
}

impl TimeWindow {
    /// Create a window, rejecting one whose start is after its end.
    ///
    /// Equal bounds are accepted; they describe a window containing only
    /// merges from that exact second.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::InvalidWindow`] when `start > end`.
    pub fn new(start: ReleaseTimestamp, end: ReleaseTimestamp) -> Result<Self, TypeError> {
        if start > end {
            return Err(TypeError::InvalidWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Start of the window (previous release).
    pub fn start(&self) -> ReleaseTimestamp {
        self.start
    }

    /// End of the window (current release).
    pub fn end(&self) -> ReleaseTimestamp {
        self.end
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
