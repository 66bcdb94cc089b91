// Protocol constants for the Kenwood memory channel dialect

/// Number of addressable memory channels (0-999)
pub const NUM_CHANNELS: usize = 1000;

/// Longest name the radio display accepts
pub const NAME_LENGTH: usize = 8;

/// Line terminator used for both commands and responses
pub const TERMINATOR: u8 = b'\r';

/// Response sent by the radio for an empty channel
pub const EMPTY_MARKER: &str = "N";

/// First character of a response the radio could not understand
pub const REJECT_PREFIX: char = '?';

/// Command prefixes
pub const ID_COMMAND: &str = "ID";
pub const ME_COMMAND: &str = "ME";
pub const MN_COMMAND: &str = "MN";

/// Number of comma separated fields in an ME line
pub const CHANNEL_FIELDS: usize = 16;

/// Fewest ME fields accepted on decode (lock-out may be missing)
pub const MIN_CHANNEL_FIELDS: usize = 15;
