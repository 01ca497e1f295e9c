use std::collections::BTreeMap;

use chrono::{FixedOffset, NaiveDate, NaiveTime, TimeDelta};

use crate::api::schedule_dto::{ClassTimeDto, FreeSlotRequestDto, ScheduleTimeIntervalsDto};
use crate::domain::free_slots::{FreeSlotCalculator, FreeSlots};
use crate::domain::intervals::ScheduleTimeIntervals;
use crate::domain::time_range::{TimeInstant, TimeRange};
use crate::error::{Error, Result};

/// A free slot query for one day, with every input already resolved.
#[derive(Debug, Clone)]
pub struct FreeSlotRequest {
    pub date: NaiveDate,
    pub zone: FixedOffset,
    pub max_slots: Option<usize>,
    pub intervals: Option<ScheduleTimeIntervals>,
    pub existing: Vec<TimeRange>,
}

impl FreeSlotRequest {
    pub fn from_dto(dto: FreeSlotRequestDto) -> Result<Self> {
        let date = parse_date(&dto.date)?;
        let zone = parse_offset(dto.utc_offset_minutes)?;

        let intervals = dto.intervals.map(|intervals| map_intervals(intervals, date, zone)).transpose()?;

        let existing = dto.classes.iter().map(|class| map_class_time(class, date, zone)).collect::<Result<Vec<_>>>()?;

        log::debug!("Request for {} resolved with {} existing classes.", date, existing.len());

        Ok(FreeSlotRequest { date, zone, max_slots: dto.max_slots, intervals, existing })
    }

    pub fn calculator(&self) -> FreeSlotCalculator {
        let calculator = FreeSlotCalculator::new(self.zone);

        match self.max_slots {
            Some(max_slots) => calculator.with_max_slots(max_slots),
            None => calculator,
        }
    }

    pub fn calculate(&self) -> Option<FreeSlots> {
        self.calculator().calculate(self.intervals.as_ref(), &self.existing)
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate(value.to_string()))
}

pub fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| Error::InvalidTimeFormat(value.to_string()))
}

pub fn parse_offset(minutes: i32) -> Result<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt).ok_or(Error::InvalidUtcOffset(minutes))
}

fn parse_minutes(field: &str, minutes: i64) -> Result<TimeDelta> {
    if minutes < 0 {
        return Err(Error::InvalidDuration { field: field.to_string(), minutes });
    }

    TimeDelta::try_minutes(minutes).ok_or_else(|| Error::InvalidDuration { field: field.to_string(), minutes })
}

fn parse_overrides(field: &str, overrides: BTreeMap<u32, i64>) -> Result<BTreeMap<u32, TimeDelta>> {
    overrides
        .into_iter()
        .map(|(number, minutes)| parse_minutes(&format!("{}[{}]", field, number), minutes).map(|duration| (number, duration)))
        .collect()
}

fn instant_on(date: NaiveDate, value: &str, zone: FixedOffset) -> Result<TimeInstant> {
    let time = parse_time_of_day(value)?;
    TimeInstant::at_date(date, time, zone).ok_or_else(|| Error::InvalidDate(date.to_string()))
}

fn map_intervals(dto: ScheduleTimeIntervalsDto, date: NaiveDate, zone: FixedOffset) -> Result<ScheduleTimeIntervals> {
    Ok(ScheduleTimeIntervals {
        first_class_time: dto.first_class_time.as_deref().map(|value| instant_on(date, value, zone)).transpose()?,
        base_class_duration: dto.base_class_duration.map(|minutes| parse_minutes("baseClassDuration", minutes)).transpose()?,
        base_break_duration: dto.base_break_duration.map(|minutes| parse_minutes("baseBreakDuration", minutes)).transpose()?,
        specific_class_duration: parse_overrides("specificClassDuration", dto.specific_class_duration)?,
        specific_break_duration: parse_overrides("specificBreakDuration", dto.specific_break_duration)?,
    })
}

fn map_class_time(dto: &ClassTimeDto, date: NaiveDate, zone: FixedOffset) -> Result<TimeRange> {
    TimeRange::new(instant_on(date, &dto.from, zone)?, instant_on(date, &dto.to, zone)?)
}
