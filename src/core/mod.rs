// Core data structures: channel entries and the memory bank
pub mod bank;
pub mod constants;
pub mod memory;

// Re-export commonly used types
pub use bank::{BankError, MemoryBank};
pub use constants::*;
pub use memory::MemoryEntry;
