use std::collections::BTreeMap;

use chrono::TimeDelta;

use crate::domain::time_range::TimeInstant;

/// Per-day timetable configuration of an organization.
///
/// Only the time of day of `first_class_time` is meaningful, the calculator
/// projects it onto whatever day is being planned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleTimeIntervals {
    pub first_class_time: Option<TimeInstant>,
    pub base_class_duration: Option<TimeDelta>,
    pub base_break_duration: Option<TimeDelta>,

    /// Duration overrides keyed by the 1-based class number.
    pub specific_class_duration: BTreeMap<u32, TimeDelta>,

    /// Break overrides keyed by the 0-based break index: key `n` is the
    /// break right before class `n + 1`.
    pub specific_break_duration: BTreeMap<u32, TimeDelta>,
}

/// A timetable whose required fields are all known.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedIntervals<'a> {
    pub first_class_time: TimeInstant,
    pub base_class_duration: TimeDelta,
    pub base_break_duration: TimeDelta,
    intervals: &'a ScheduleTimeIntervals,
}

impl ScheduleTimeIntervals {
    pub fn new(first_class_time: TimeInstant, base_class_duration: TimeDelta, base_break_duration: TimeDelta) -> Self {
        ScheduleTimeIntervals {
            first_class_time: Some(first_class_time),
            base_class_duration: Some(base_class_duration),
            base_break_duration: Some(base_break_duration),
            specific_class_duration: BTreeMap::new(),
            specific_break_duration: BTreeMap::new(),
        }
    }

    pub fn with_class_duration(mut self, number: u32, duration: TimeDelta) -> Self {
        self.specific_class_duration.insert(number, duration);
        self
    }

    pub fn with_break_duration(mut self, number: u32, duration: TimeDelta) -> Self {
        self.specific_break_duration.insert(number, duration);
        self
    }

    /// `None` while any of the first class time, class duration or break duration is unset.
    pub fn resolve(&self) -> Option<ResolvedIntervals<'_>> {
        Some(ResolvedIntervals {
            first_class_time: self.first_class_time?,
            base_class_duration: self.base_class_duration?,
            base_break_duration: self.base_break_duration?,
            intervals: self,
        })
    }
}

impl ResolvedIntervals<'_> {
    /// Duration of the class with the 1-based `number`.
    pub fn class_duration(&self, number: u32) -> TimeDelta {
        self.intervals.specific_class_duration.get(&number).copied().unwrap_or(self.base_class_duration)
    }

    /// Duration of the break with the 0-based `number`, i.e. the break before class `number + 1`.
    pub fn break_duration(&self, number: u32) -> TimeDelta {
        self.intervals.specific_break_duration.get(&number).copied().unwrap_or(self.base_break_duration)
    }
}
