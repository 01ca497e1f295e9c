use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::free_slots::CandidateSlot;

/// Timetable settings of an organization as stored in its schedule configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTimeIntervalsDto {
    /// Time of day, `HH:MM`.
    pub first_class_time: Option<String>,

    /// Minutes.
    pub base_class_duration: Option<i64>,

    /// Minutes.
    pub base_break_duration: Option<i64>,

    #[serde(default)]
    pub specific_class_duration: BTreeMap<u32, i64>,

    #[serde(default)]
    pub specific_break_duration: BTreeMap<u32, i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClassTimeDto {
    pub from: String,
    pub to: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FreeSlotRequestDto {
    /// `YYYY-MM-DD`, the day every `HH:MM` value of the request refers to.
    pub date: String,

    #[serde(default)]
    pub utc_offset_minutes: i32,

    pub max_slots: Option<usize>,

    pub intervals: Option<ScheduleTimeIntervalsDto>,

    #[serde(default)]
    pub classes: Vec<ClassTimeDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FreeSlotDto {
    pub number: u32,
    pub from: String,
    pub to: String,
    pub is_free: bool,
}

impl FreeSlotDto {
    pub fn from_slot(slot: &CandidateSlot, zone: chrono::FixedOffset) -> Self {
        FreeSlotDto {
            number: slot.number,
            from: slot.range.from().time_in(zone).format("%H:%M").to_string(),
            to: slot.range.to().time_in(zone).format("%H:%M").to_string(),
            is_free: slot.is_free,
        }
    }
}
