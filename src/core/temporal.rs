//! Temporal data types and time handling

use crate::error::{Error, Result};
use chrono::{
    Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc,
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout used for SQL `TIMESTAMP '...'` literals
pub const SQL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepted input layouts, tried in order
const PARSE_FORMATS: [&str; 3] = [SQL_TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Wall-clock instant in the reference timezone.
///
/// Calendar math and SQL rendering happen on the wall-clock value; the
/// offset that produced it is not retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp {
    inner: NaiveDateTime,
}

impl Timestamp {
    /// Wrap a chrono wall-clock value
    pub fn from_naive(inner: NaiveDateTime) -> Self {
        Self { inner }
    }

    /// Build a timestamp from calendar fields, validating each of them
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, min, sec))
            .map(Self::from_naive)
            .ok_or_else(|| {
                Error::Temporal(format!(
                    "invalid calendar time {year:04}-{month:02}-{day:02} {hour:02}:{min:02}:{sec:02}"
                ))
            })
    }

    /// Current wall-clock time at a fixed UTC offset
    pub fn now_in(offset: FixedOffset) -> Self {
        Self::from_naive(Utc::now().with_timezone(&offset).naive_local())
    }

    /// Current wall-clock time in the host's local timezone
    pub fn now_local() -> Self {
        Self::from_naive(Local::now().naive_local())
    }

    /// Parse `yyyy-MM-dd HH:mm:ss`, ISO-8601 without offset, or a bare date (midnight)
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        for format in PARSE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
                return Ok(Self::from_naive(dt));
            }
        }
        let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|e| Error::Temporal(format!("unrecognized timestamp '{text}': {e}")))?;
        Ok(Self::from_naive(date.and_time(NaiveTime::MIN)))
    }

    /// Underlying chrono value
    pub fn naive(&self) -> NaiveDateTime {
        self.inner
    }

    /// Render as `yyyy-MM-dd HH:mm:ss`; sub-second precision is dropped
    pub fn to_sql_literal(&self) -> String {
        self.inner.format(SQL_TIMESTAMP_FORMAT).to_string()
    }

    /// Add a duration. Overflow leaves the timestamp unchanged.
    pub fn add(&self, duration: Duration) -> Self {
        self.inner
            .checked_add_signed(duration)
            .map(Self::from_naive)
            .unwrap_or(*self)
    }

    /// Subtract a duration. Overflow leaves the timestamp unchanged.
    pub fn sub(&self, duration: Duration) -> Self {
        self.inner
            .checked_sub_signed(duration)
            .map(Self::from_naive)
            .unwrap_or(*self)
    }

    /// Elapsed time from `earlier` to `self` (negative if `earlier` is later)
    pub fn since(&self, earlier: Timestamp) -> Duration {
        self.inner.signed_duration_since(earlier.inner)
    }

    /// Midnight of the day containing this timestamp
    pub fn start_of_day(&self) -> Self {
        Self::from_naive(self.inner.date().and_time(NaiveTime::MIN))
    }

    /// Midnight of the first day of the week containing this timestamp
    pub fn start_of_week(&self, week_start: WeekStart) -> Self {
        let date = self.inner.date();
        let back = match week_start {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        };
        let first = date
            .checked_sub_signed(Duration::days(i64::from(back)))
            .unwrap_or(date);
        Self::from_naive(first.and_time(NaiveTime::MIN))
    }

    /// Midnight of the first day of the month containing this timestamp
    pub fn start_of_month(&self) -> Self {
        let date = self.inner.date();
        let first = date.with_day(1).unwrap_or(date);
        Self::from_naive(first.and_time(NaiveTime::MIN))
    }

    /// Midnight of January 1st of the year containing this timestamp
    pub fn start_of_year(&self) -> Self {
        let date = self.inner.date();
        let first = date.with_ordinal(1).unwrap_or(date);
        Self::from_naive(first.and_time(NaiveTime::MIN))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sql_literal())
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Self::from_naive(dt)
    }
}

/// First day of the calendar week
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

/// Navigation direction for period shifting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

/// Precision used when describing a range to a person
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFormat {
    /// `May 15, 2023 14:30`
    Minutes,
    /// `May 15, 2023`
    Days,
}

impl RangeFormat {
    fn pattern(&self) -> &'static str {
        match self {
            Self::Minutes => "%b %-d, %Y %H:%M",
            Self::Days => "%b %-d, %Y",
        }
    }
}

/// Concrete time window `[from, to)` with `from <= to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    from: Timestamp,
    to: Timestamp,
}

impl DateRange {
    /// Create a range, rejecting inverted bounds
    pub fn new(from: Timestamp, to: Timestamp) -> Result<Self> {
        if from > to {
            return Err(Error::Temporal(format!(
                "range start {from} is after range end {to}"
            )));
        }
        Ok(Self { from, to })
    }

    /// Create a range from two instants in either order
    pub fn from_bounds(a: Timestamp, b: Timestamp) -> Self {
        if a <= b {
            Self { from: a, to: b }
        } else {
            Self { from: b, to: a }
        }
    }

    /// Range start
    pub fn from(&self) -> Timestamp {
        self.from
    }

    /// Range end
    pub fn to(&self) -> Timestamp {
        self.to
    }

    /// Length of the range
    pub fn span(&self) -> Duration {
        self.to.since(self.from)
    }

    /// Check if a timestamp lies within `[from, to)`
    pub fn contains(&self, ts: Timestamp) -> bool {
        ts >= self.from && ts < self.to
    }

    /// Translate both endpoints by the range's own span.
    ///
    /// The span is kept exactly and no calendar alignment is applied, so
    /// shifting forward and then backward returns the original range. If
    /// either endpoint would overflow, the range is returned unchanged.
    pub fn shift(&self, direction: Direction) -> Self {
        let span = self.span();
        let (from, to) = match direction {
            Direction::Forward => (
                self.from.inner.checked_add_signed(span),
                self.to.inner.checked_add_signed(span),
            ),
            Direction::Backward => (
                self.from.inner.checked_sub_signed(span),
                self.to.inner.checked_sub_signed(span),
            ),
        };
        match (from, to) {
            (Some(from), Some(to)) => Self {
                from: Timestamp::from_naive(from),
                to: Timestamp::from_naive(to),
            },
            _ => *self,
        }
    }

    /// Human-readable description, e.g. `From May 1, 2023 to May 5, 2023`
    pub fn summary(&self, format: RangeFormat) -> String {
        let pattern = format.pattern();
        format!(
            "From {} to {}",
            self.from.naive().format(pattern),
            self.to.naive().format(pattern)
        )
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.from, self.to)
    }
}
