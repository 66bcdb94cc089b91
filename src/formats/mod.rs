// File format handlers
pub mod json;

pub use json::{load_channels, save_channels, JsonError};
