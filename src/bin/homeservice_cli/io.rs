#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use time::Date;
use time::macros::format_description;

use crate::args::JsonInput;
use crate::client::CliError;

pub fn read_value(val: Option<String>, file: Option<PathBuf>) -> Result<String, CliError> {
    read_opt_value(val, file)?.ok_or_else(|| CliError::InvalidInput("value required".into()))
}

pub fn read_opt_value(
    val: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>, CliError> {
    if let Some(path) = file {
        let data = fs::read_to_string(&path).map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })?;
        return Ok(Some(data));
    }
    Ok(val)
}

/// Parses a `--data`/`--data-file` payload into a request type.
pub fn read_json<T: DeserializeOwned>(input: JsonInput) -> Result<T, CliError> {
    let raw = read_value(input.data, input.data_file)?;
    serde_json::from_str(&raw).map_err(|e| CliError::InvalidInput(format!("invalid JSON: {e}")))
}

pub fn parse_date(val: &str) -> Result<Date, CliError> {
    Date::parse(val.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|e| CliError::InvalidInput(format!("`{val}` is not a YYYY-MM-DD date: {e}")))
}

pub fn parse_date_opt(val: Option<String>) -> Result<Option<Date>, CliError> {
    val.as_deref().map(parse_date).transpose()
}
