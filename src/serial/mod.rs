// Serial communication module for radio I/O
pub mod comm;
pub mod protocol;
pub mod transport;

#[cfg(test)]
pub mod mock;

pub use comm::{list_ports, SerialConfig, SerialError, SerialPort};
pub use protocol::CommandChannel;
pub use transport::Transport;
