//! Channel handler: hands records over to another thread

use crate::core::{DispatchRecord, Handler, LoggerError, OwnedRecord, Result};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};

/// Forwards an owned copy of every record over a crossbeam channel.
///
/// A full or disconnected channel is reported as a handler error, which the
/// dispatcher swallows.
///
/// # Example
///
/// ```
/// use pretty_logger_system::prelude::*;
/// use pretty_logger_system::handlers::ChannelHandler;
/// use std::sync::Arc;
///
/// let logger = Logger::builder().sink(Arc::new(BufferSink::new())).build();
/// let (handler, records) = ChannelHandler::unbounded();
/// logger.attach(Arc::new(handler));
///
/// logger.info("hello");
/// assert_eq!(records.try_recv().unwrap().parts, vec![Value::from("hello")]);
/// ```
pub struct ChannelHandler {
    sender: Sender<OwnedRecord>,
}

impl ChannelHandler {
    pub fn new(sender: Sender<OwnedRecord>) -> Self {
        Self { sender }
    }

    pub fn unbounded() -> (Self, Receiver<OwnedRecord>) {
        let (sender, receiver) = unbounded();
        (Self::new(sender), receiver)
    }

    pub fn bounded(capacity: usize) -> (Self, Receiver<OwnedRecord>) {
        let (sender, receiver) = bounded(capacity);
        (Self::new(sender), receiver)
    }
}

impl Handler for ChannelHandler {
    fn handle(&self, record: &DispatchRecord<'_>) -> Result<()> {
        match self.sender.try_send(record.to_owned_record()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(LoggerError::handler("channel", "channel is full")),
            Err(TrySendError::Disconnected(_)) => Err(LoggerError::ChannelDisconnected),
        }
    }

    fn name(&self) -> &str {
        "channel"
    }
}
