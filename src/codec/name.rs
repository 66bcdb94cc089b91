// MN line encoding: channel names

use super::{strip_terminator, CodecError, Result};
use crate::core::constants::{EMPTY_MARKER, MN_COMMAND, NAME_LENGTH};
use crate::core::MemoryEntry;

/// Format `MN ddd,<name>` (no terminator).
///
/// Names longer than the radio's 8 character display are cut to the
/// first 8 characters.
pub fn encode_name_line(entry: &MemoryEntry) -> String {
    let name: String = entry.name.chars().take(NAME_LENGTH).collect();
    format!("{} {:03},{}", MN_COMMAND, entry.number, name)
}

/// Parse an MN response into the channel name.
///
/// The empty marker, a missing value and an empty value all give "".
/// The name is the second comma separated field, taken as-is; anything
/// after a further comma is dropped.
pub fn decode_name_line(line: &str) -> Result<String> {
    let body = strip_terminator(line);

    if body == EMPTY_MARKER {
        return Ok(String::new());
    }

    if !body.starts_with(MN_COMMAND) {
        return Err(CodecError::new(MN_COMMAND, body, "missing \"MN\" prefix"));
    }

    Ok(body.split(',').nth(1).unwrap_or_default().to_string())
}
