//! Network handler for remote logging
//!
//! Sends formatted log messages to a remote server over TCP.

use crate::core::{DispatchRecord, Handler, LoggerError, Result};
use parking_lot::Mutex;
use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

const IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Network handler that writes each formatted message to a TCP server
///
/// # Example
///
/// ```no_run
/// use pretty_logger_system::handlers::NetworkHandler;
/// use pretty_logger_system::prelude::*;
/// use std::sync::Arc;
///
/// let handler = NetworkHandler::connect("127.0.0.1:8080")
///     .expect("Failed to connect to log server");
///
/// let logger = get_logger(Some("network"));
/// logger.attach(Arc::new(handler));
/// logger.info("This log will be sent to 127.0.0.1:8080");
/// ```
pub struct NetworkHandler {
    stream: Mutex<Option<TcpStream>>,
    address: String,
    reconnect_on_error: bool,
}

impl NetworkHandler {
    /// Connect to `addr` (e.g. "localhost:8080")
    ///
    /// # Errors
    ///
    /// Returns error if connection fails
    pub fn connect(addr: impl ToSocketAddrs + ToString) -> Result<Self> {
        let address = addr.to_string();
        let stream = Self::open(&address)?;

        Ok(Self {
            stream: Mutex::new(Some(stream)),
            address,
            reconnect_on_error: true,
        })
    }

    /// Enable or disable automatic reconnection on errors
    ///
    /// Default: enabled
    #[must_use]
    pub fn with_reconnect(mut self, enable: bool) -> Self {
        self.reconnect_on_error = enable;
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn open(address: &str) -> Result<TcpStream> {
        let stream = TcpStream::connect(address)?;
        stream.set_write_timeout(Some(IO_TIMEOUT))?;
        stream.set_read_timeout(Some(IO_TIMEOUT))?;
        stream.set_nodelay(true)?;
        Ok(stream)
    }

    fn send(&self, message: &str) -> Result<()> {
        let mut guard = self.stream.lock();

        let result = match guard.as_mut() {
            Some(stream) => stream.write_all(message.as_bytes()),
            None if self.reconnect_on_error => Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "stream closed",
            )),
            None => return Err(LoggerError::writer("Network stream not connected")),
        };

        let error = match result {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        *guard = None;
        if !self.reconnect_on_error {
            return Err(error.into());
        }

        match Self::open(&self.address) {
            Ok(mut stream) => {
                stream.write_all(message.as_bytes())?;
                *guard = Some(stream);
                Ok(())
            }
            Err(reconnect_err) => Err(LoggerError::writer(format!(
                "Failed to send log and reconnect: {} (reconnect: {})",
                error, reconnect_err
            ))),
        }
    }
}

impl Handler for NetworkHandler {
    fn handle(&self, record: &DispatchRecord<'_>) -> Result<()> {
        self.send(record.message)
    }

    fn name(&self) -> &str {
        "network"
    }
}
