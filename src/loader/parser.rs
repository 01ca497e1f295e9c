use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::api::schedule_dto::FreeSlotRequestDto;
use crate::domain::request::FreeSlotRequest;
use crate::error::Result;

/// Parses a JSON file into a given type `T`.
///
/// Errors are converted into `crate::error::Error` variants:
/// - `Error::IoError` if the file cannot be read.
/// - `Error::DeserializationError` if the JSON is malformed.
pub fn parse_json_file<T: DeserializeOwned>(file_path: impl AsRef<Path>) -> Result<T> {
    let data = fs::read_to_string(file_path)?;
    parse_json_str(&data)
}

pub fn parse_json_str<T: DeserializeOwned>(data: &str) -> Result<T> {
    Ok(serde_json::from_str(data)?)
}

/// Loads a free slot request from `file_path` and resolves it against its date and offset.
pub fn load_request(file_path: impl AsRef<Path>) -> Result<FreeSlotRequest> {
    let file_path = file_path.as_ref();
    let dto: FreeSlotRequestDto = parse_json_file(file_path)?;
    log::info!("Loaded free slot request from '{}'.", file_path.display());

    FreeSlotRequest::from_dto(dto)
}
