// Byte-stream capability the command channel runs on

use super::comm::Result;

/// An already-open duplex byte stream.
///
/// Implemented by [`super::SerialPort`] for real hardware and by the mock
/// port in tests. Calls are awaited one at a time; nothing here is meant
/// to be shared between tasks.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Write every byte of `buf`
    async fn write_all(&mut self, buf: &[u8]) -> Result<()>;

    /// Push buffered output to the device
    async fn flush(&mut self) -> Result<()>;

    /// Read up to and including the next `delimiter` byte
    async fn read_until(&mut self, delimiter: u8) -> Result<Vec<u8>>;
}
