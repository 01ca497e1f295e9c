use std::path::Path;

use crate::domain::free_slots::FreeSlots;
use crate::domain::request::FreeSlotRequest;
use crate::error::Result;
use crate::loader::parser::load_request;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;
pub mod report;

pub use domain::free_slots::{CandidateSlot, FreeSlotCalculator, MAX_SLOTS};
pub use domain::intervals::ScheduleTimeIntervals;
pub use domain::time_range::{TimeInstant, TimeRange, overlaps_any};

/// Loads the request at `file_path` and computes its free slots.
///
/// The inner `None` means the timetable of the request is incomplete.
pub fn generate_free_slots(file_path: impl AsRef<Path>) -> Result<(FreeSlotRequest, Option<FreeSlots>)> {
    let request = load_request(file_path)?;
    log::info!("Request parsed successfully.");

    let slots = request.calculate();
    Ok((request, slots))
}
