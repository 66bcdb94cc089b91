//! JSON snapshot of occupied channels
//!
//! A snapshot is a JSON array of channel entries, pretty printed with two
//! space indentation. Zero fields are omitted from each entry.

use crate::core::MemoryEntry;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid channel snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JsonError>;

/// Save channels to a JSON snapshot file
pub fn save_channels(filename: impl AsRef<Path>, channels: &[MemoryEntry]) -> Result<()> {
    let file = File::create(filename.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, channels)?;
    writer.flush()?;

    tracing::info!(
        "Saved {} channels to {}",
        channels.len(),
        filename.as_ref().display()
    );
    Ok(())
}

/// Load channels from a JSON snapshot file
pub fn load_channels(filename: impl AsRef<Path>) -> Result<Vec<MemoryEntry>> {
    let file = File::open(filename.as_ref())?;
    let channels: Vec<MemoryEntry> = serde_json::from_reader(BufReader::new(file))?;

    tracing::info!(
        "Loaded {} channels from {}",
        channels.len(),
        filename.as_ref().display()
    );
    Ok(channels)
}
