//! Live output sinks

pub mod buffer;
pub mod console;

pub use buffer::BufferSink;
pub use console::ConsoleSink;

pub use crate::core::Sink;
