// The radio's bank of memory channels, indexed by channel number

use super::constants::NUM_CHANNELS;
use super::memory::MemoryEntry;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BankError {
    #[error("Channel {0} is outside the memory bank (0-999)")]
    ChannelOutOfRange(usize),

    #[error("Channel {0} appears more than once")]
    DuplicateChannel(u16),
}

pub type Result<T> = std::result::Result<T, BankError>;

/// Fixed-size bank of 1000 channel slots.
///
/// Slot position and channel number always agree: every entry stored in
/// the bank has its `number` set to its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBank {
    slots: Vec<MemoryEntry>,
}

impl Default for MemoryBank {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBank {
    /// Create a bank with every slot empty
    pub fn new() -> Self {
        Self {
            slots: (0..NUM_CHANNELS).map(|n| MemoryEntry::new(n as u16)).collect(),
        }
    }

    /// Number of slots (always 1000)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, channel: usize) -> Result<&MemoryEntry> {
        self.slots
            .get(channel)
            .ok_or(BankError::ChannelOutOfRange(channel))
    }

    /// Store an entry at `channel`, overriding whatever number it carried
    pub fn set(&mut self, channel: usize, mut entry: MemoryEntry) -> Result<()> {
        let slot = self
            .slots
            .get_mut(channel)
            .ok_or(BankError::ChannelOutOfRange(channel))?;
        entry.number = channel as u16;
        *slot = entry;
        Ok(())
    }

    /// All slots in channel order
    pub fn iter(&self) -> impl Iterator<Item = &MemoryEntry> {
        self.slots.iter()
    }

    /// Slots with a nonzero RX frequency, in ascending channel order
    pub fn occupied_channels(&self) -> Vec<MemoryEntry> {
        self.slots
            .iter()
            .filter(|m| m.is_occupied())
            .cloned()
            .collect()
    }

    /// Empty every slot
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Replace the whole bank with externally loaded entries.
    ///
    /// Each entry lands in the slot named by its `number`; slots not
    /// mentioned are left empty. The bank is untouched if any entry is
    /// out of range or two entries claim the same channel.
    pub fn load_entries(&mut self, entries: impl IntoIterator<Item = MemoryEntry>) -> Result<()> {
        let mut bank = Self::new();
        let mut seen = vec![false; NUM_CHANNELS];

        for entry in entries {
            let channel = entry.number as usize;
            if channel >= NUM_CHANNELS {
                return Err(BankError::ChannelOutOfRange(channel));
            }
            if seen[channel] {
                return Err(BankError::DuplicateChannel(entry.number));
            }
            seen[channel] = true;
            bank.slots[channel] = entry;
        }

        *self = bank;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupied(number: u16, freq: u32) -> MemoryEntry {
        let mut mem = MemoryEntry::new(number);
        mem.rx_frequency = freq;
        mem.tx_frequency = freq;
        mem
    }

    #[test]
    fn test_new_bank() {
        let bank = MemoryBank::new();
        assert_eq!(bank.len(), NUM_CHANNELS);
        assert_eq!(bank.get(999).unwrap().number, 999);
        assert!(bank.occupied_channels().is_empty());
        assert_eq!(bank.get(1000), Err(BankError::ChannelOutOfRange(1000)));
    }

    #[test]
    fn test_set_restamps_number() {
        let mut bank = MemoryBank::new();
        bank.set(42, occupied(7, 146_520_000)).unwrap();
        assert_eq!(bank.get(42).unwrap().number, 42);
        assert!(!bank.get(7).unwrap().is_occupied());
    }

    #[test]
    fn test_occupied_channels_in_order() {
        let mut bank = MemoryBank::new();
        bank.set(7, occupied(7, 440_000_000)).unwrap();
        bank.set(5, occupied(5, 145_000_000)).unwrap();
        // Channel 6 has a TX frequency but no RX frequency, so it is empty
        let mut six = MemoryEntry::new(6);
        six.tx_frequency = 145_000_000;
        bank.set(6, six).unwrap();

        let numbers: Vec<u16> = bank.occupied_channels().iter().map(|m| m.number).collect();
        assert_eq!(numbers, vec![5, 7]);

        // Pure projection, calling it twice gives the same answer
        assert_eq!(bank.occupied_channels(), bank.occupied_channels());
    }

    #[test]
    fn test_load_entries_by_number() {
        let mut bank = MemoryBank::new();
        bank.set(1, occupied(1, 145_000_000)).unwrap();

        bank.load_entries(vec![occupied(0, 146_520_000), occupied(900, 446_000_000)])
            .unwrap();

        assert!(bank.get(0).unwrap().is_occupied());
        assert!(!bank.get(1).unwrap().is_occupied());
        assert_eq!(bank.get(900).unwrap().rx_frequency, 446_000_000);
        assert_eq!(bank.occupied_channels().len(), 2);
    }

    #[test]
    fn test_load_entries_rejects_bad_input() {
        let mut bank = MemoryBank::new();
        bank.set(3, occupied(3, 145_000_000)).unwrap();
        let before = bank.clone();

        let result = bank.load_entries(vec![occupied(1000, 145_000_000)]);
        assert_eq!(result, Err(BankError::ChannelOutOfRange(1000)));

        let result = bank.load_entries(vec![occupied(4, 145_000_000), occupied(4, 146_000_000)]);
        assert_eq!(result, Err(BankError::DuplicateChannel(4)));

        assert_eq!(bank, before);
    }

    #[test]
    fn test_clear() {
        let mut bank = MemoryBank::new();
        bank.set(3, occupied(3, 145_000_000)).unwrap();
        bank.clear();
        assert!(bank.occupied_channels().is_empty());
    }
}
