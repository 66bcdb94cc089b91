//! Text codec for the Kenwood memory channel commands.
//!
//! Everything here is pure: lines go in, entries come out. Commands are
//! built without the trailing `\r`, which the command channel appends.
//! Decoders accept response lines with or without the terminator.

pub mod channel;
pub mod name;

use crate::core::constants::{ID_COMMAND, ME_COMMAND, MN_COMMAND, TERMINATOR};
use thiserror::Error;

pub use channel::{check_channel_fields, decode_channel_line, encode_channel_line};
pub use name::{decode_name_line, encode_name_line};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed {kind} line {line:?}: {reason}")]
pub struct CodecError {
    /// Which kind of line failed ("ME", "MN", "ID")
    pub kind: &'static str,
    /// The raw line as received
    pub line: String,
    pub reason: String,
}

impl CodecError {
    pub(crate) fn new(kind: &'static str, line: &str, reason: impl Into<String>) -> Self {
        Self {
            kind,
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;

/// Drop a single trailing terminator if present
pub(crate) fn strip_terminator(line: &str) -> &str {
    line.strip_suffix(TERMINATOR as char).unwrap_or(line)
}

/// `ID`
pub fn identify_command() -> String {
    ID_COMMAND.to_string()
}

/// `ME ddd`
pub fn read_channel_command(channel: u16) -> String {
    format!("{} {:03}", ME_COMMAND, channel)
}

/// `MN ddd`
pub fn read_name_command(channel: u16) -> String {
    format!("{} {:03}", MN_COMMAND, channel)
}

/// `ME ddd,C`
pub fn clear_channel_command(channel: u16) -> String {
    format!("{} {:03},C", ME_COMMAND, channel)
}

/// Extract the model from an `ID <model>` response
pub fn parse_identification(line: &str) -> Result<String> {
    let body = strip_terminator(line);
    let model = body
        .strip_prefix(ID_COMMAND)
        .filter(|rest| rest.starts_with(' '))
        .and_then(|rest| rest.split_whitespace().next())
        .ok_or_else(|| CodecError::new(ID_COMMAND, body, "expected \"ID <model>\""))?;
    Ok(model.to_string())
}
