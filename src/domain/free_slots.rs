use chrono::{FixedOffset, NaiveDate, Offset, TimeDelta, Utc};

use crate::domain::intervals::{ResolvedIntervals, ScheduleTimeIntervals};
use crate::domain::time_range::{TimeInstant, TimeRange, overlaps_any};

/// Upper bound of candidate slots per day. Also stops zero-length timetables.
pub const MAX_SLOTS: usize = 26;

/// One candidate class period of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateSlot {
    /// 1-based class number.
    pub number: u32,
    pub range: TimeRange,
    pub is_free: bool,
}

/// Candidate slots of one day in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeSlots {
    slots: Vec<CandidateSlot>,
}

impl FreeSlots {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandidateSlot> {
        self.slots.iter()
    }

    /// Free flag of the slot covering exactly `range`.
    pub fn get(&self, range: &TimeRange) -> Option<bool> {
        self.slots.iter().find(|slot| slot.range == *range).map(|slot| slot.is_free)
    }

    pub fn slot(&self, number: u32) -> Option<&CandidateSlot> {
        self.slots.iter().find(|slot| slot.number == number)
    }

    pub fn free(&self) -> impl Iterator<Item = &CandidateSlot> {
        self.slots.iter().filter(|slot| slot.is_free)
    }

    pub fn first_free(&self) -> Option<&CandidateSlot> {
        self.free().next()
    }

    pub fn as_slice(&self) -> &[CandidateSlot] {
        &self.slots
    }
}

impl<'a> IntoIterator for &'a FreeSlots {
    type Item = &'a CandidateSlot;
    type IntoIter = std::slice::Iter<'a, CandidateSlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

/// Enumerates the class slots of a day and marks the ones already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeSlotCalculator {
    /// Zone in which calendar days and times of day are read.
    zone: FixedOffset,
    max_slots: usize,
}

impl Default for FreeSlotCalculator {
    fn default() -> Self {
        FreeSlotCalculator { zone: Utc.fix(), max_slots: MAX_SLOTS }
    }
}

impl FreeSlotCalculator {
    pub fn new(zone: FixedOffset) -> Self {
        FreeSlotCalculator { zone, ..Default::default() }
    }

    pub fn with_zone(mut self, zone: FixedOffset) -> Self {
        self.zone = zone;
        self
    }

    /// Values above [`MAX_SLOTS`] are capped.
    pub fn with_max_slots(mut self, max_slots: usize) -> Self {
        self.max_slots = max_slots.min(MAX_SLOTS);
        self
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    /// Computes the candidate slots of the day the existing classes are on.
    ///
    /// The reference day is the day of the first entry of `existing`, or the
    /// day of `first_class_time` when there are no classes yet. Generation
    /// stops at the first slot that would end on another day.
    ///
    /// # Returns
    /// `None` if the timetable is unknown (no intervals, or one of first class
    /// time, base class duration and base break duration is unset). This is
    /// different from `Some` of an empty result, which means no slot fits.
    pub fn calculate(&self, intervals: Option<&ScheduleTimeIntervals>, existing: &[TimeRange]) -> Option<FreeSlots> {
        let Some(resolved) = intervals.and_then(ScheduleTimeIntervals::resolve) else {
            tracing::warn!("Timetable intervals are incomplete, free slots are indeterminate.");
            return None;
        };

        let reference_date = match existing.first() {
            Some(first) => first.from().date_in(self.zone),
            None => resolved.first_class_time.date_in(self.zone),
        };

        let slots = self.generate(&resolved, reference_date, existing);

        tracing::debug!(
            "Computed {} candidate slots ({} free) for {} against {} existing classes.",
            slots.len(),
            slots.free().count(),
            reference_date,
            existing.len()
        );

        Some(slots)
    }

    /// Standard time range of class `number` (1-based) on `date`, ignoring occupancy.
    pub fn class_range(&self, intervals: &ScheduleTimeIntervals, number: u32, date: NaiveDate) -> Option<TimeRange> {
        if number == 0 {
            return None;
        }

        let resolved = intervals.resolve()?;
        self.generate(&resolved, date, &[]).slot(number).map(|slot| slot.range)
    }

    fn generate(&self, intervals: &ResolvedIntervals<'_>, date: NaiveDate, existing: &[TimeRange]) -> FreeSlots {
        let mut slots = Vec::new();

        let Some(mut cursor) = TimeInstant::at_date(date, intervals.first_class_time.time_in(self.zone), self.zone) else {
            return FreeSlots { slots };
        };

        for number in 0..self.max_slots as u32 {
            if number > 0 {
                let break_duration = intervals.break_duration(number);
                if break_duration < TimeDelta::zero() {
                    break;
                }

                match cursor.plus(break_duration) {
                    Some(next) => cursor = next,
                    None => break,
                }
            }

            let Some(candidate_end) = cursor.plus(intervals.class_duration(number + 1)) else {
                break;
            };

            if !candidate_end.is_on_date(date, self.zone) || !cursor.is_on_date(date, self.zone) {
                break;
            }

            // Negative overrides can put the end before the start, such slots end the day.
            let Ok(range) = TimeRange::new(cursor, candidate_end) else {
                break;
            };

            slots.push(CandidateSlot { number: number + 1, range, is_free: !overlaps_any(&range, existing) });
            cursor = candidate_end;
        }

        FreeSlots { slots }
    }
}
