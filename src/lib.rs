// kenwood-memory: read and write the memory channels of a Kenwood radio
// over its text command interface

pub mod codec;
pub mod core;
pub mod drivers;
pub mod formats;
pub mod serial;

// Re-export commonly used types
pub use codec::CodecError;
pub use self::core::{constants::*, BankError, MemoryBank, MemoryEntry};
pub use drivers::{KenwoodRadio, RadioError, RadioResult, StatusCallback, WriteState};
pub use formats::{load_channels, save_channels, JsonError};
pub use serial::{CommandChannel, SerialConfig, SerialError, SerialPort, Transport};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
