use thiserror::Error;

use crate::domain::time_range::TimeInstant;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse free slot request JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write JSON output: {0}")]
    SerializationError(serde_json::Error),

    #[error("Failed to write CSV output: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid time of day '{0}', expected HH:MM")]
    InvalidTimeFormat(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid UTC offset of {0} minutes")]
    InvalidUtcOffset(i32),

    #[error("Invalid duration for {field}: {minutes} minutes")]
    InvalidDuration { field: String, minutes: i64 },

    #[error("Invalid time range: start {from} is after end {to}")]
    InvalidTimeRange { from: TimeInstant, to: TimeInstant },
}

pub type Result<T> = std::result::Result<T, Error>;
