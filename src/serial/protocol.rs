// Line-based command/response protocol
// One command out, one \r terminated line back, strictly in turn

use super::transport::Transport;
use crate::codec::CodecError;
use crate::core::constants::{REJECT_PREFIX, TERMINATOR};
use crate::drivers::{RadioError, RadioResult};

/// Request/response transactions over a [`Transport`].
///
/// The channel owns the transport exclusively. Every call to
/// [`transact`](Self::transact) writes and flushes the command, then waits
/// for the reply before returning, so commands never overlap.
pub struct CommandChannel<T> {
    transport: T,
    transactions: usize,
}

impl<T: Transport> CommandChannel<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            transactions: 0,
        }
    }

    /// Send `command` and return the radio's reply.
    ///
    /// `command` is given without its terminator. The reply comes back
    /// without the trailing `\r`. A reply starting with `?` means the
    /// radio did not understand the command and is returned as
    /// [`RadioError::Rejected`].
    pub async fn transact(&mut self, command: &str) -> RadioResult<String> {
        let mut bytes = Vec::with_capacity(command.len() + 1);
        bytes.extend_from_slice(command.as_bytes());
        bytes.push(TERMINATOR);

        self.transport.write_all(&bytes).await?;
        self.transport.flush().await?;
        tracing::debug!(send = %command, "serial");

        let raw = self.transport.read_until(TERMINATOR).await?;
        self.transactions += 1;

        let line = String::from_utf8(raw).map_err(|e| {
            RadioError::Malformed(CodecError::new(
                "response",
                &String::from_utf8_lossy(e.as_bytes()),
                "invalid UTF-8",
            ))
        })?;
        let line = line
            .strip_suffix(TERMINATOR as char)
            .map(str::to_string)
            .unwrap_or(line);
        tracing::debug!(recv = %line, "serial");

        if line.starts_with(REJECT_PREFIX) {
            tracing::warn!(command = %command, response = %line, "radio rejected command");
            return Err(RadioError::Rejected(command.to_string()));
        }

        Ok(line)
    }

    /// Number of completed transactions
    pub fn transactions(&self) -> usize {
        self.transactions
    }

    pub fn get_ref(&self) -> &T {
        &self.transport
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }
}
