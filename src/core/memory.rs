// Memory structure representing a single radio memory channel

use serde::{Deserialize, Serialize};
use std::fmt;

fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// One memory channel as the radio stores it.
///
/// The numeric fields hold the raw codes sent over the wire; nothing is
/// translated into tone tables or mode names. A channel whose
/// `rx_frequency` is zero is unused.
///
/// The serde names match the JSON snapshots written by earlier versions
/// of the tool, with zero values left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Memory channel number (0-999)
    #[serde(rename = "Number", default, skip_serializing_if = "is_zero")]
    pub number: u16,

    /// Receive frequency in Hz
    #[serde(rename = "RXFrequency", default, skip_serializing_if = "is_zero")]
    pub rx_frequency: u32,

    #[serde(rename = "RXStepSize", default, skip_serializing_if = "is_zero")]
    pub rx_step_size: u8,

    #[serde(rename = "ShiftDirection", default, skip_serializing_if = "is_zero")]
    pub shift_direction: u8,

    #[serde(rename = "ReverseEnabled", default, skip_serializing_if = "is_zero")]
    pub reverse_enabled: u8,

    #[serde(rename = "ToneEnabled", default, skip_serializing_if = "is_zero")]
    pub tone_enabled: u8,

    #[serde(rename = "CTCSSEnabled", default, skip_serializing_if = "is_zero")]
    pub ctcss_enabled: u8,

    #[serde(rename = "DCSEnabled", default, skip_serializing_if = "is_zero")]
    pub dcs_enabled: u8,

    /// Tone table index
    #[serde(rename = "ToneFrequency", default, skip_serializing_if = "is_zero")]
    pub tone_frequency: u16,

    /// CTCSS table index
    #[serde(rename = "CTCSSFrequency", default, skip_serializing_if = "is_zero")]
    pub ctcss_frequency: u16,

    /// DCS table index
    #[serde(rename = "DCSFrequency", default, skip_serializing_if = "is_zero")]
    pub dcs_frequency: u16,

    /// Repeater offset in Hz
    #[serde(rename = "OffsetFrequency", default, skip_serializing_if = "is_zero")]
    pub offset_frequency: u32,

    #[serde(rename = "Mode", default, skip_serializing_if = "is_zero")]
    pub mode: u8,

    /// Transmit frequency in Hz
    #[serde(rename = "TXFrequency", default, skip_serializing_if = "is_zero")]
    pub tx_frequency: u32,

    #[serde(rename = "TXStepSize", default, skip_serializing_if = "is_zero")]
    pub tx_step_size: u8,

    #[serde(rename = "LockOut", default, skip_serializing_if = "is_zero")]
    pub lock_out: u8,

    /// Channel name, at most 8 characters on the radio
    #[serde(rename = "Name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl MemoryEntry {
    /// Create an empty entry for the given channel
    pub fn new(number: u16) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// A channel is in use iff its receive frequency is set
    pub fn is_occupied(&self) -> bool {
        self.rx_frequency != 0
    }

    /// Format frequency in Hz as a string (e.g., "146.520000")
    pub fn format_freq(freq: u32) -> String {
        format!("{}.{:06}", freq / 1_000_000, freq % 1_000_000)
    }
}

impl fmt::Display for MemoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_occupied() {
            return write!(f, "Memory {:03}: <empty>", self.number);
        }

        write!(
            f,
            "Memory {:03}: rx {} tx {} offset {} shift {} mode {} ({}){}",
            self.number,
            Self::format_freq(self.rx_frequency),
            Self::format_freq(self.tx_frequency),
            Self::format_freq(self.offset_frequency),
            self.shift_direction,
            self.mode,
            self.name,
            if self.lock_out != 0 { " [L/O]" } else { "" }
        )
    }
}
