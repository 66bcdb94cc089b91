// Serial port abstraction with async support
// Wraps the serialport crate with tokio async functionality

use super::transport::Transport;
use std::io::{self, Read, Write};
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

/// Longest response line accepted before giving up on the terminator
pub const MAX_LINE_LEN: usize = 256;

#[derive(Error, Debug)]
pub enum SerialError {
    #[error("Serial port error: {0}")]
    Port(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Port not open")]
    NotOpen,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No terminator within {0} bytes")]
    LineTooLong(usize),
}

pub type Result<T> = std::result::Result<T, SerialError>;

/// Serial port configuration
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Baud rate (e.g., 9600, 19200, 38400, 57600)
    pub baud_rate: u32,

    /// Data bits (5, 6, 7, 8)
    pub data_bits: serialport::DataBits,

    /// Stop bits
    pub stop_bits: serialport::StopBits,

    /// Parity
    pub parity: serialport::Parity,

    /// Flow control
    pub flow_control: serialport::FlowControl,

    /// Longest wait for a complete response line
    pub timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            data_bits: serialport::DataBits::Eight,
            stop_bits: serialport::StopBits::One,
            parity: serialport::Parity::None,
            flow_control: serialport::FlowControl::None,
            timeout: Duration::from_secs(2),
        }
    }
}

impl SerialConfig {
    /// Create a new configuration with specified baud rate
    pub fn new(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            ..Default::default()
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set hardware flow control (RTS/CTS)
    pub fn with_hardware_flow(mut self) -> Self {
        self.flow_control = serialport::FlowControl::Hardware;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.baud_rate == 0 {
            return Err(SerialError::InvalidConfig("baud rate must be nonzero".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(SerialError::InvalidConfig("timeout must be nonzero".to_string()));
        }
        Ok(())
    }
}

/// Accumulates bytes up to a delimiter, bounded by [`MAX_LINE_LEN`]
struct LineBuffer {
    line: Vec<u8>,
    delimiter: u8,
}

impl LineBuffer {
    fn new(delimiter: u8) -> Self {
        Self {
            line: Vec::new(),
            delimiter,
        }
    }

    /// Add one byte; yields the finished line, delimiter included
    fn push(&mut self, byte: u8) -> Result<Option<Vec<u8>>> {
        self.line.push(byte);
        if byte == self.delimiter {
            return Ok(Some(std::mem::take(&mut self.line)));
        }
        if self.line.len() >= MAX_LINE_LEN {
            return Err(SerialError::LineTooLong(MAX_LINE_LEN));
        }
        Ok(None)
    }
}

/// Async serial port wrapper
pub struct SerialPort {
    port: Option<Box<dyn serialport::SerialPort>>,
    config: SerialConfig,
    port_name: String,
}

impl SerialPort {
    /// Open a serial port with the given configuration
    pub fn open(port_name: &str, config: SerialConfig) -> Result<Self> {
        config.validate()?;

        // The driver-level timeout only bounds a single read() call; the
        // line timeout is enforced in read_line
        let port = serialport::new(port_name, config.baud_rate)
            .data_bits(config.data_bits)
            .stop_bits(config.stop_bits)
            .parity(config.parity)
            .flow_control(config.flow_control)
            .timeout(Duration::from_millis(50))
            .open()
            .map_err(|e| SerialError::Port(e.to_string()))?;

        tracing::debug!(port = port_name, baud = config.baud_rate, "serial port opened");

        Ok(Self {
            port: Some(port),
            config,
            port_name: port_name.to_string(),
        })
    }

    /// Get the port name
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Get the configuration
    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    /// Read bytes up to and including `delimiter`.
    ///
    /// The whole line must arrive within the configured timeout.
    pub async fn read_line(&mut self, delimiter: u8) -> Result<Vec<u8>> {
        let port = self.port.as_mut().ok_or(SerialError::NotOpen)?;

        timeout(self.config.timeout, async {
            let mut line = LineBuffer::new(delimiter);
            let mut byte = [0u8; 1];
            loop {
                match port.read(&mut byte) {
                    Ok(0) => {
                        return Err(SerialError::Io(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "Port closed",
                        )))
                    }
                    Ok(_) => {
                        if let Some(done) = line.push(byte[0])? {
                            return Ok(done);
                        }
                    }
                    Err(ref e) if e.kind() == io::ErrorKind::TimedOut => {
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        continue;
                    }
                    Err(e) => return Err(SerialError::Io(e)),
                }
            }
        })
        .await
        .map_err(|_| SerialError::Timeout(self.config.timeout))?
    }

    /// Write all bytes with timeout
    pub async fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(SerialError::NotOpen)?;

        timeout(self.config.timeout, async {
            port.write_all(buf).map_err(SerialError::Io)
        })
        .await
        .map_err(|_| SerialError::Timeout(self.config.timeout))?
    }

    /// Flush the output buffer
    pub async fn flush(&mut self) -> Result<()> {
        let port = self.port.as_mut().ok_or(SerialError::NotOpen)?;
        port.flush().map_err(SerialError::Io)
    }

    /// Clear both input and output buffers
    pub fn clear_all(&mut self) -> Result<()> {
        let port = self.port.as_mut().ok_or(SerialError::NotOpen)?;
        port.clear(serialport::ClearBuffer::All)
            .map_err(|e| SerialError::Port(e.to_string()))
    }

    /// Close the port
    pub fn close(mut self) -> Result<()> {
        self.port.take();
        tracing::debug!(port = %self.port_name, "serial port closed");
        Ok(())
    }
}

impl Transport for SerialPort {
    async fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        SerialPort::write_all(self, buf).await
    }

    async fn flush(&mut self) -> Result<()> {
        SerialPort::flush(self).await
    }

    async fn read_until(&mut self, delimiter: u8) -> Result<Vec<u8>> {
        self.read_line(delimiter).await
    }
}

/// List available serial ports
pub fn list_ports() -> Result<Vec<String>> {
    serialport::available_ports()
        .map_err(|e| SerialError::Port(e.to_string()))?
        .into_iter()
        .map(|p| Ok(p.port_name))
        .collect()
}
