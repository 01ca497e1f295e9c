use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};

use crate::error::{Error, Result};

/// An absolute point in time with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeInstant(DateTime<Utc>);

impl TimeInstant {
    /// Returns `None` if `millis` lies outside chrono's representable range.
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(TimeInstant)
    }

    /// Combines a calendar date and a time of day, both read in `zone`.
    pub fn at_date(date: NaiveDate, time: NaiveTime, zone: FixedOffset) -> Option<Self> {
        zone.from_local_datetime(&date.and_time(time)).single().map(|local| TimeInstant(local.with_timezone(&Utc)))
    }

    pub fn millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn plus(&self, delta: TimeDelta) -> Option<Self> {
        self.0.checked_add_signed(delta).map(TimeInstant)
    }

    pub fn minus(&self, delta: TimeDelta) -> Option<Self> {
        self.0.checked_sub_signed(delta).map(TimeInstant)
    }

    pub fn date_in(&self, zone: FixedOffset) -> NaiveDate {
        self.0.with_timezone(&zone).date_naive()
    }

    pub fn time_in(&self, zone: FixedOffset) -> NaiveTime {
        self.0.with_timezone(&zone).time()
    }

    pub fn is_same_day(&self, other: &TimeInstant, zone: FixedOffset) -> bool {
        self.date_in(zone) == other.date_in(zone)
    }

    pub fn is_on_date(&self, date: NaiveDate, zone: FixedOffset) -> bool {
        self.date_in(zone) == date
    }
}

impl fmt::Display for TimeInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S%.3f UTC"))
    }
}

/// A class period. `from <= to` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeRange {
    from: TimeInstant,
    to: TimeInstant,
}

impl TimeRange {
    pub fn new(from: TimeInstant, to: TimeInstant) -> Result<Self> {
        if from > to {
            return Err(Error::InvalidTimeRange { from, to });
        }

        Ok(TimeRange { from, to })
    }

    pub fn from(&self) -> TimeInstant {
        self.from
    }

    pub fn to(&self) -> TimeInstant {
        self.to
    }

    pub fn duration(&self) -> TimeDelta {
        self.to.0 - self.from.0
    }

    /// Half-open overlap: a range ending exactly when `other` begins is not a conflict.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.from < other.to && other.from < self.to
    }

    /// Formats the range as `HH:MM-HH:MM` in `zone`.
    pub fn format_in(&self, zone: FixedOffset) -> String {
        format!("{}-{}", self.from.time_in(zone).format("%H:%M"), self.to.time_in(zone).format("%H:%M"))
    }
}

/// Returns `true` if `candidate` overlaps at least one of `references`.
pub fn overlaps_any(candidate: &TimeRange, references: &[TimeRange]) -> bool {
    references.iter().any(|reference| candidate.overlaps(reference))
}
