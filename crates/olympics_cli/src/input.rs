//! Interactive prompt helpers.
//!
//! # Responsibility
//! - Read and parse one console argument at a time.
//! - Turn bad input into a command error instead of a crash.

use crate::console::CommandError;
use chrono::NaiveDate;
use olympics_core::{Competition, EntityId};
use std::io::{self, Write};

/// Prints the label and reads one trimmed line from stdin.
///
/// End of input surfaces as `UnexpectedEof` so the menu loop can quit
/// cleanly when stdin closes.
pub fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    let bytes = io::stdin().read_line(&mut line)?;
    if bytes == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
    }
    Ok(line.trim().to_string())
}

pub fn prompt_text(label: &str) -> Result<String, CommandError> {
    Ok(prompt(label)?)
}

pub fn prompt_id(label: &str) -> Result<EntityId, CommandError> {
    let value = prompt(label)?;
    value
        .parse::<EntityId>()
        .map_err(|_| CommandError::Input(format!("`{value}` is not a whole-number id")))
}

pub fn prompt_u32(label: &str) -> Result<u32, CommandError> {
    let value = prompt(label)?;
    value
        .parse::<u32>()
        .map_err(|_| CommandError::Input(format!("`{value}` is not a non-negative number")))
}

pub fn prompt_i64(label: &str) -> Result<i64, CommandError> {
    let value = prompt(label)?;
    value
        .parse::<i64>()
        .map_err(|_| CommandError::Input(format!("`{value}` is not a whole number")))
}

pub fn prompt_date(label: &str) -> Result<NaiveDate, CommandError> {
    let value = prompt(label)?;
    Competition::parse_date(&value)
        .map_err(|_| CommandError::Input(format!("`{value}` is not a date in dd-mm-YYYY layout")))
}
