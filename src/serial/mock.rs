// Mock serial port for testing without hardware

use super::comm::{SerialConfig, SerialError};
use super::transport::Transport;
use crate::core::constants::TERMINATOR;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex};

/// Produces the radio's reply line for one command line
type Responder = Box<dyn FnMut(&str) -> String + Send>;

/// Mock serial port for testing.
///
/// Clones share the same buffers, so a test can keep one handle and give
/// another to the code under test.
#[derive(Clone)]
pub struct MockSerialPort {
    /// Data to be read (simulates radio responses)
    read_buffer: Arc<Mutex<VecDeque<u8>>>,

    /// Data that was written (simulates commands sent to radio)
    write_buffer: Arc<Mutex<Vec<u8>>>,

    /// Optional radio simulation, answers each complete command line
    responder: Arc<Mutex<Option<Responder>>>,

    /// When set, every write fails with a broken pipe
    fail_writes: Arc<Mutex<bool>>,

    /// Configuration
    config: SerialConfig,
}

impl MockSerialPort {
    /// Create a new mock serial port
    pub fn new() -> Self {
        Self {
            read_buffer: Arc::new(Mutex::new(VecDeque::new())),
            write_buffer: Arc::new(Mutex::new(Vec::new())),
            responder: Arc::new(Mutex::new(None)),
            fail_writes: Arc::new(Mutex::new(false)),
            config: SerialConfig::default(),
        }
    }

    /// Create a port that answers every command through `responder`.
    ///
    /// The responder gets the command without its terminator and returns
    /// the reply without its terminator.
    pub fn with_responder(responder: impl FnMut(&str) -> String + Send + 'static) -> Self {
        let port = Self::new();
        *port.responder.lock().unwrap() = Some(Box::new(responder));
        port
    }

    /// Push data to be read (simulates radio sending data)
    pub fn push_read_data(&mut self, data: &[u8]) {
        let mut buffer = self.read_buffer.lock().unwrap();
        for &byte in data {
            buffer.push_back(byte);
        }
    }

    /// Get data that was written (simulates reading commands sent to radio)
    pub fn get_written_data(&self) -> Vec<u8> {
        self.write_buffer.lock().unwrap().clone()
    }

    /// Written data split into command lines, terminators removed
    pub fn written_commands(&self) -> Vec<String> {
        let data = self.get_written_data();
        String::from_utf8_lossy(&data)
            .split(TERMINATOR as char)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Clear written data
    pub fn clear_written_data(&mut self) {
        self.write_buffer.lock().unwrap().clear();
    }

    /// Make subsequent writes fail
    pub fn fail_writes(&mut self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    /// Get number of bytes available to read
    pub fn bytes_available(&self) -> usize {
        self.read_buffer.lock().unwrap().len()
    }

    /// Feed complete command lines to the responder
    fn respond(&self, data: &[u8]) {
        let mut responder = self.responder.lock().unwrap();
        let Some(responder) = responder.as_mut() else {
            return;
        };

        let text = String::from_utf8_lossy(data);
        for command in text.split(TERMINATOR as char).filter(|s| !s.is_empty()) {
            let reply = responder(command);
            let mut buffer = self.read_buffer.lock().unwrap();
            buffer.extend(reply.bytes());
            buffer.push_back(TERMINATOR);
        }
    }
}

impl Default for MockSerialPort {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockSerialPort {
    async fn write_all(&mut self, buf: &[u8]) -> Result<(), SerialError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(SerialError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "mock write failure",
            )));
        }

        self.write_buffer.lock().unwrap().extend_from_slice(buf);
        self.respond(buf);
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SerialError> {
        Ok(())
    }

    /// Pops bytes through the delimiter; times out if none is buffered
    async fn read_until(&mut self, delimiter: u8) -> Result<Vec<u8>, SerialError> {
        let mut buffer = self.read_buffer.lock().unwrap();
        let Some(end) = buffer.iter().position(|&b| b == delimiter) else {
            return Err(SerialError::Timeout(self.config.timeout));
        };
        Ok(buffer.drain(..=end).collect())
    }
}

/// In-memory stand-in for a Kenwood radio's memory command set.
///
/// Stores the ME and MN lines written to each channel and plays them back
/// on read. Commands listed in `reject` are answered with `?`.
#[derive(Debug, Default)]
pub struct SimulatedRadio {
    pub model: String,
    pub channels: HashMap<u16, String>,
    pub names: HashMap<u16, String>,
    pub reject: Vec<String>,
}

impl SimulatedRadio {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            ..Default::default()
        }
    }

    /// Answer one command line
    pub fn handle(&mut self, command: &str) -> String {
        if self.reject.iter().any(|r| r == command) {
            return "?".to_string();
        }

        let Some((prefix, args)) = command.split_once(' ') else {
            return if command == "ID" {
                format!("ID {}", self.model)
            } else {
                "?".to_string()
            };
        };

        let channel: Option<u16> = args.get(..3).and_then(|c| c.parse().ok());
        let Some(channel) = channel else {
            return "?".to_string();
        };

        match (prefix, &args[3..]) {
            ("ME", "") => self.channels.get(&channel).cloned().unwrap_or("N".to_string()),
            ("MN", "") => self.names.get(&channel).cloned().unwrap_or("N".to_string()),
            ("ME", ",C") => {
                self.channels.remove(&channel);
                self.names.remove(&channel);
                command.to_string()
            }
            ("ME", _) => {
                self.channels.insert(channel, command.to_string());
                command.to_string()
            }
            ("MN", _) => {
                self.names.insert(channel, command.to_string());
                command.to_string()
            }
            _ => "?".to_string(),
        }
    }

    /// Wrap the simulation in a mock port; the returned handle inspects state
    pub fn into_port(self) -> (MockSerialPort, Arc<Mutex<SimulatedRadio>>) {
        let radio = Arc::new(Mutex::new(self));
        let handle = radio.clone();
        let port = MockSerialPort::with_responder(move |command| radio.lock().unwrap().handle(command));
        (port, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_serial_basic() {
        let mut port = MockSerialPort::new();
        port.push_read_data(b"Hello\rWorld\r");

        assert_eq!(port.read_until(b'\r').await.unwrap(), b"Hello\r");
        assert_eq!(port.read_until(b'\r').await.unwrap(), b"World\r");

        port.write_all(b"ID\r").await.unwrap();
        assert_eq!(port.get_written_data(), b"ID\r");
        assert_eq!(port.written_commands(), vec!["ID"]);

        port.clear_written_data();
        assert!(port.get_written_data().is_empty());
    }

    #[tokio::test]
    async fn test_mock_serial_timeout() {
        let mut port = MockSerialPort::new();
        port.push_read_data(b"no terminator");

        let result = port.read_until(b'\r').await;
        assert!(matches!(result, Err(SerialError::Timeout(_))));
        // Partial data stays buffered
        assert_eq!(port.bytes_available(), 13);
    }

    #[tokio::test]
    async fn test_simulated_radio() {
        let (mut port, radio) = SimulatedRadio::new("TM-V71").into_port();

        port.write_all(b"ID\r").await.unwrap();
        assert_eq!(port.read_until(b'\r').await.unwrap(), b"ID TM-V71\r");

        port.write_all(b"MN 004,HOME\rMN 004\r").await.unwrap();
        assert_eq!(port.read_until(b'\r').await.unwrap(), b"MN 004,HOME\r");
        assert_eq!(port.read_until(b'\r').await.unwrap(), b"MN 004,HOME\r");

        port.write_all(b"ME 004,C\rMN 004\r").await.unwrap();
        assert_eq!(port.read_until(b'\r').await.unwrap(), b"ME 004,C\r");
        assert_eq!(port.read_until(b'\r').await.unwrap(), b"N\r");

        port.write_all(b"XX\r").await.unwrap();
        assert_eq!(port.read_until(b'\r').await.unwrap(), b"?\r");

        assert!(radio.lock().unwrap().names.is_empty());
    }
}
