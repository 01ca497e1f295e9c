use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use study_slots::api::schedule_dto::FreeSlotRequestDto;
use study_slots::domain::request::FreeSlotRequest;
use study_slots::loader::parser::parse_json_file;
use study_slots::logger;
use study_slots::report::{OutputFormat, write_slots};

/// Lists the class slots of a day and which of them are still free.
#[derive(Debug, Parser)]
#[command(name = "study_slots", version)]
struct Cli {
    /// JSON request with the day, the timetable intervals and the existing classes.
    request: PathBuf,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Overrides `maxSlots` of the request.
    #[arg(long)]
    max_slots: Option<usize>,

    /// Overrides `utcOffsetMinutes` of the request.
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<i32>,
}

fn main() -> anyhow::Result<ExitCode> {
    logger::init();
    let cli = Cli::parse();

    let mut dto: FreeSlotRequestDto =
        parse_json_file(&cli.request).with_context(|| format!("Could not load request '{}'", cli.request.display()))?;

    // Times of day are anchored in the offset, so overrides apply before resolving.
    if let Some(max_slots) = cli.max_slots {
        dto.max_slots = Some(max_slots);
    }
    if let Some(minutes) = cli.utc_offset {
        dto.utc_offset_minutes = minutes;
    }

    let request = FreeSlotRequest::from_dto(dto)?;

    let Some(slots) = request.calculate() else {
        log::warn!("Timetable of {} is incomplete.", request.date);
        eprintln!("Time data is not loaded yet: first class time, class duration and break duration are required.");
        return Ok(ExitCode::from(2));
    };

    log::info!("{} of {} slots on {} are free.", slots.free().count(), slots.len(), request.date);

    let mut stdout = std::io::stdout().lock();
    write_slots(&mut stdout, &slots, request.zone, cli.format)?;

    Ok(ExitCode::SUCCESS)
}
