// Kenwood memory channel driver
//
// Talks the ID / ME / MN command set over a CommandChannel and keeps the
// radio's 1000 channel bank in memory. Reads fetch every slot; writes
// push only occupied slots, each as clear + numeric line + name line.

use super::error::{RadioError, RadioResult, Status, StatusCallback, WriteState};
use crate::codec::{
    check_channel_fields, clear_channel_command, decode_channel_line, decode_name_line, encode_channel_line,
    encode_name_line, identify_command, parse_identification, read_channel_command,
    read_name_command,
};
use crate::core::constants::{EMPTY_MARKER, NUM_CHANNELS};
use crate::core::{MemoryBank, MemoryEntry};
use crate::serial::{CommandChannel, Transport};

/// Kenwood radio driver
pub struct KenwoodRadio<T> {
    channel: CommandChannel<T>,
    memory: MemoryBank,
    vendor: String,
    model: Option<String>,
}

impl<T: Transport> KenwoodRadio<T> {
    pub fn new(transport: T) -> Self {
        Self {
            channel: CommandChannel::new(transport),
            memory: MemoryBank::new(),
            vendor: "Kenwood".to_string(),
            model: None,
        }
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Model reported by the last successful [`identify`](Self::identify)
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn memory(&self) -> &MemoryBank {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut MemoryBank {
        &mut self.memory
    }

    pub fn command_channel(&self) -> &CommandChannel<T> {
        &self.channel
    }

    pub fn into_transport(self) -> T {
        self.channel.into_inner()
    }

    /// Ask the radio for its model string
    pub async fn identify(&mut self) -> RadioResult<String> {
        let line = self.channel.transact(&identify_command()).await?;
        let model = parse_identification(&line).map_err(|e| RadioError::Protocol(e.to_string()))?;

        tracing::info!(model = %model, "identified radio");
        self.model = Some(model.clone());
        Ok(model)
    }

    /// Read one channel from the radio without touching the bank
    pub async fn read_channel(&mut self, channel: u16) -> RadioResult<MemoryEntry> {
        check_channel(channel)?;
        self.fetch_channel(channel)
            .await
            .map_err(|source| RadioError::ReadFailed {
                channel,
                source: Box::new(source),
            })
    }

    async fn fetch_channel(&mut self, channel: u16) -> RadioResult<MemoryEntry> {
        let channel_line = self.channel.transact(&read_channel_command(channel)).await?;
        let name_line = self.channel.transact(&read_name_command(channel)).await?;

        let mut entry = decode_channel_line(&channel_line)?;
        if channel_line != EMPTY_MARKER && entry.number != channel {
            return Err(RadioError::Protocol(format!(
                "asked for channel {} but radio answered {:?}",
                channel, channel_line
            )));
        }
        entry.name = decode_name_line(&name_line)?;
        // The empty marker carries no number
        entry.number = channel;
        Ok(entry)
    }

    /// Read all 1000 channels into the bank, in ascending order.
    ///
    /// Stops at the first failure. Slots before the failing channel hold
    /// the freshly read data, later slots keep what they held before.
    pub async fn read_memory(&mut self, status_fn: Option<StatusCallback>) -> RadioResult<()> {
        tracing::info!("Reading {} memory channels from radio", NUM_CHANNELS);

        for number in 0..NUM_CHANNELS {
            let entry = self.read_channel(number as u16).await?;
            if entry.is_occupied() {
                tracing::debug!("{}", entry);
            }
            self.memory.set(number, entry)?;

            Status::new(
                number + 1,
                NUM_CHANNELS,
                format!("Reading channel {}/{}", number + 1, NUM_CHANNELS),
            )
            .report(status_fn.as_ref());
        }

        tracing::info!(
            "Found {} occupied channels out of {}",
            self.memory.occupied_channels().len(),
            NUM_CHANNELS
        );
        Ok(())
    }

    /// Occupied channels of the bank in ascending order
    pub fn occupied_channels(&self) -> Vec<MemoryEntry> {
        self.memory.occupied_channels()
    }

    /// Replace the bank with externally loaded entries
    pub fn load_channels(&mut self, entries: Vec<MemoryEntry>) -> RadioResult<()> {
        self.memory.load_entries(entries)?;
        tracing::info!(
            "Loaded {} occupied channels into memory bank",
            self.memory.occupied_channels().len()
        );
        Ok(())
    }

    /// Write one occupied channel from the bank to the radio.
    ///
    /// Empty channels and channels with fields too wide for the ME line
    /// are refused before anything is sent.
    pub async fn write_channel(&mut self, channel: u16) -> RadioResult<()> {
        check_channel(channel)?;
        let entry = self.memory.get(channel as usize)?.clone();
        if !entry.is_occupied() {
            return Err(RadioError::Precondition(format!(
                "channel {} is empty and cannot be written",
                channel
            )));
        }
        check_channel_fields(&entry)?;
        self.push_entry(&entry).await
    }

    /// Clear, then write numeric fields, then the name.
    ///
    /// There is no rollback: a failure after the clear leaves the channel
    /// blank or nameless on the radio, and the error says which. Callers
    /// run `check_channel_fields` first.
    async fn push_entry(&mut self, entry: &MemoryEntry) -> RadioResult<()> {
        let steps = [
            (clear_channel_command(entry.number), WriteState::Cleared),
            (encode_channel_line(entry), WriteState::NumericWritten),
            (encode_name_line(entry), WriteState::Committed),
        ];

        let mut state = WriteState::Unwritten;
        for (command, next) in steps {
            if let Err(source) = self.channel.transact(&command).await {
                tracing::error!(channel = entry.number, %state, "channel write aborted");
                return Err(RadioError::WriteFailed {
                    channel: entry.number,
                    state,
                    source: Box::new(source),
                });
            }
            state = next;
        }

        tracing::debug!(channel = entry.number, %state, "channel written");
        Ok(())
    }

    /// Write every occupied channel to the radio, in ascending order.
    ///
    /// Returns how many channels were written. Every channel is checked
    /// before the first command goes out, so a bad entry anywhere in the
    /// bank leaves the radio untouched. Stops at the first radio failure;
    /// channels after it are not touched.
    pub async fn write_memory(&mut self, status_fn: Option<StatusCallback>) -> RadioResult<usize> {
        let occupied = self.occupied_channels();
        for entry in &occupied {
            check_channel_fields(entry)?;
        }
        let total = occupied.len();
        tracing::info!("Writing {} occupied channels to radio", total);

        for (index, entry) in occupied.iter().enumerate() {
            self.push_entry(entry).await?;

            Status::new(
                index + 1,
                total,
                format!("Wrote channel {:03} ({}/{})", entry.number, index + 1, total),
            )
            .report(status_fn.as_ref());
        }

        tracing::info!("Wrote {} channels", total);
        Ok(total)
    }
}

fn check_channel(channel: u16) -> RadioResult<()> {
    if channel as usize >= NUM_CHANNELS {
        return Err(RadioError::Precondition(format!(
            "channel {} is outside 0-{}",
            channel,
            NUM_CHANNELS - 1
        )));
    }
    Ok(())
}
