// Radio driver errors and progress reporting

use crate::codec::CodecError;
use crate::core::BankError;
use crate::serial::SerialError;
use std::fmt;
use thiserror::Error;

/// How far a single channel write got on the radio.
///
/// Each step needs the radio's acknowledgement of the previous one and
/// none can be undone, so a failed write leaves the channel on the device
/// in the last state listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteState {
    /// Nothing sent yet, the radio still holds its old contents
    Unwritten,
    /// The clear command was acknowledged, the channel is blank
    Cleared,
    /// Frequencies and flags are written, the name is not
    NumericWritten,
    /// Name acknowledged, the channel is fully written
    Committed,
}

impl fmt::Display for WriteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WriteState::Unwritten => "unwritten",
            WriteState::Cleared => "cleared",
            WriteState::NumericWritten => "numeric fields written",
            WriteState::Committed => "committed",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug)]
pub enum RadioError {
    #[error("Serial communication error: {0}")]
    Transport(#[from] SerialError),

    #[error("Radio rejected command {0:?}")]
    Rejected(String),

    #[error(transparent)]
    Malformed(#[from] CodecError),

    #[error("Unexpected response from radio: {0}")]
    Protocol(String),

    #[error("Cannot perform operation: {0}")]
    Precondition(String),

    #[error("Memory bank error: {0}")]
    Bank(#[from] BankError),

    #[error("Failed reading channel {channel}: {source}")]
    ReadFailed {
        channel: u16,
        #[source]
        source: Box<RadioError>,
    },

    #[error("Failed writing channel {channel} (radio left {state}): {source}")]
    WriteFailed {
        channel: u16,
        state: WriteState,
        #[source]
        source: Box<RadioError>,
    },
}

impl RadioError {
    /// The innermost error, skipping per-channel context
    pub fn root(&self) -> &RadioError {
        match self {
            RadioError::ReadFailed { source, .. } | RadioError::WriteFailed { source, .. } => {
                source.root()
            }
            other => other,
        }
    }
}

pub type RadioResult<T> = std::result::Result<T, RadioError>;

/// Progress callback for bulk read/write operations
pub type StatusCallback = Box<dyn Fn(usize, usize, &str) + Send + Sync>;

/// Status information for progress reporting
#[derive(Debug, Clone)]
pub struct Status {
    pub current: usize,
    pub max: usize,
    pub message: String,
}

impl Status {
    pub fn new(current: usize, max: usize, message: impl Into<String>) -> Self {
        Self {
            current,
            max,
            message: message.into(),
        }
    }

    pub fn percent(&self) -> f32 {
        if self.max == 0 {
            return 100.0;
        }
        (self.current as f32 / self.max as f32) * 100.0
    }

    /// Hand this status to an optional callback
    pub fn report(&self, callback: Option<&StatusCallback>) {
        if let Some(callback) = callback {
            callback(self.current, self.max, &self.message);
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}/{}  - {:.1}%)",
            self.message,
            self.current,
            self.max,
            self.percent()
        )
    }
}
