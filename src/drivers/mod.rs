// Radio driver framework
pub mod error;

// Drivers
pub mod kenwood;

pub use error::{RadioError, RadioResult, Status, StatusCallback, WriteState};
pub use kenwood::KenwoodRadio;
