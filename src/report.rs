use std::io::Write;

use chrono::FixedOffset;
use colored::Colorize;

use crate::api::schedule_dto::FreeSlotDto;
use crate::domain::free_slots::FreeSlots;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

pub fn to_dtos(slots: &FreeSlots, zone: FixedOffset) -> Vec<FreeSlotDto> {
    slots.iter().map(|slot| FreeSlotDto::from_slot(slot, zone)).collect()
}

pub fn write_slots<W: Write>(writer: &mut W, slots: &FreeSlots, zone: FixedOffset, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(writer, slots, zone),
        OutputFormat::Json => write_json(writer, slots, zone),
        OutputFormat::Csv => write_csv(writer, slots, zone),
    }
}

fn write_table<W: Write>(writer: &mut W, slots: &FreeSlots, zone: FixedOffset) -> Result<()> {
    if slots.is_empty() {
        writeln!(writer, "No class fits into this day.")?;
        return Ok(());
    }

    for slot in slots {
        let state = if slot.is_free { "free".green() } else { "occupied".red() };
        writeln!(writer, "{:>2}. {}  {}", slot.number, slot.range.format_in(zone), state)?;
    }

    Ok(())
}

fn write_json<W: Write>(writer: &mut W, slots: &FreeSlots, zone: FixedOffset) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &to_dtos(slots, zone)).map_err(Error::SerializationError)?;
    writeln!(writer)?;
    Ok(())
}

fn write_csv<W: Write>(writer: &mut W, slots: &FreeSlots, zone: FixedOffset) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for dto in to_dtos(slots, zone) {
        csv_writer.serialize(dto)?;
    }

    csv_writer.flush()?;
    Ok(())
}
